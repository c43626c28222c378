//! Instruction Decoding
//!
//! Every Tally instruction is a single byte of program text. Decoding maps
//! it onto a closed [`Opcode`] enumeration; any byte outside the opcode
//! table is a digit literal, which is how multi-digit constants are built
//! one character at a time.

/// One decoded Tally instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// `'` — push a new empty number
    PushEmpty,
    /// `,` — pop and discard the top
    Drop,
    /// `:` — duplicate the top (deep copy)
    Dup,
    /// `;` — swap the top two
    Swap,
    /// `@` — pop depth N, deep-copy the element at depth N, push it
    Pick,
    /// `.` — read one input byte, prepend as the top's least-significant digit
    ReadChar,
    /// `>` — pop, detach the least-significant byte, write it to output
    WriteChar,
    /// `!` — pop; push 1 if it was falsy, else 0
    Not,
    /// `<` — pop a, pop b; push 1 if b < a numerically, else 0
    Less,
    /// `=` — pop a, pop b; push 1 if a == b numerically, else 0
    Equal,
    /// `~` — push the current instruction offset
    PushPc,
    /// `?` — pop target T, pop condition W; jump to T if W is truthy
    JumpIf,
    /// `-` — negate the top in place
    Negate,
    /// `^` — make the top non-negative in place
    Abs,
    /// `$` — detach the top's least-significant byte, push it as a number
    SplitLow,
    /// `#` — pop a; splice a's digits onto the end of the new top's digits
    Concat,
    /// `+` — pop a, pop b; push a + b
    Add,
    /// `&` — debug-print the stack, top first, without mutating it
    DumpStack,
    /// `]` — pop a character code, push a one-byte number holding that byte
    Chr,
    /// `[` — pop, detach the least-significant byte, push its character code
    Ord,
    /// any other byte — prepend it as the top's least-significant digit
    Literal(u8),
}

impl Opcode {
    /// Decode one program byte. Total: unrecognized bytes are literals.
    pub fn decode(byte: u8) -> Opcode {
        match byte {
            b'\'' => Opcode::PushEmpty,
            b',' => Opcode::Drop,
            b':' => Opcode::Dup,
            b';' => Opcode::Swap,
            b'@' => Opcode::Pick,
            b'.' => Opcode::ReadChar,
            b'>' => Opcode::WriteChar,
            b'!' => Opcode::Not,
            b'<' => Opcode::Less,
            b'=' => Opcode::Equal,
            b'~' => Opcode::PushPc,
            b'?' => Opcode::JumpIf,
            b'-' => Opcode::Negate,
            b'^' => Opcode::Abs,
            b'$' => Opcode::SplitLow,
            b'#' => Opcode::Concat,
            b'+' => Opcode::Add,
            b'&' => Opcode::DumpStack,
            b']' => Opcode::Chr,
            b'[' => Opcode::Ord,
            other => Opcode::Literal(other),
        }
    }

    /// Short name for trace output.
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::PushEmpty => "push-empty",
            Opcode::Drop => "drop",
            Opcode::Dup => "dup",
            Opcode::Swap => "swap",
            Opcode::Pick => "pick",
            Opcode::ReadChar => "read-char",
            Opcode::WriteChar => "write-char",
            Opcode::Not => "not",
            Opcode::Less => "less",
            Opcode::Equal => "equal",
            Opcode::PushPc => "push-pc",
            Opcode::JumpIf => "jump-if",
            Opcode::Negate => "negate",
            Opcode::Abs => "abs",
            Opcode::SplitLow => "split-low",
            Opcode::Concat => "concat",
            Opcode::Add => "add",
            Opcode::DumpStack => "dump-stack",
            Opcode::Chr => "chr",
            Opcode::Ord => "ord",
            Opcode::Literal(_) => "literal",
        }
    }
}
