//! The Tally Machine
//!
//! A single-threaded fetch/dispatch loop over one line of program text.
//! Each step decodes the byte at the program counter, executes it against
//! the operand stack, and produces the next counter; execution halts when
//! the counter reaches the end of the program. There is no error state:
//! malformed programs are precondition violations (they panic with a named
//! operation), and non-terminating programs run forever by design.
//!
//! The machine is generic over its input and output streams so tests can
//! drive it with in-memory buffers; the CLI wires up stdin and stdout.

use std::io::{self, Read, Write};

use tracing::trace;

use tally_core::{Number, OperandStack};

use crate::opcode::Opcode;

/// Byte delivered by the read instruction once input is exhausted.
///
/// Fixed at NUL so end-of-input behaves identically on every platform.
pub const EOF_SENTINEL: u8 = 0x00;

/// One program execution: program text, program counter, operand stack,
/// and the streams the `.`/`>`/`&` instructions talk to.
pub struct Machine<'p, R, W> {
    program: &'p [u8],
    pc: usize,
    stack: OperandStack,
    input: R,
    output: W,
}

impl<'p, R: Read, W: Write> Machine<'p, R, W> {
    pub fn new(program: &'p [u8], input: R, output: W) -> Self {
        Machine {
            program,
            pc: 0,
            stack: OperandStack::new(),
            input,
            output,
        }
    }

    /// Current program counter (offset into the program text).
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// The operand stack, for inspection after a run.
    pub fn stack(&self) -> &OperandStack {
        &self.stack
    }

    /// Run to completion: step until the program counter passes the end of
    /// the program text, then flush the output stream.
    pub fn run(&mut self) -> io::Result<()> {
        while self.pc < self.program.len() {
            self.step()?;
        }
        self.output.flush()
    }

    /// Execute the single instruction under the program counter and advance.
    ///
    /// Only I/O failures surface as errors; everything else in the
    /// instruction set is total over well-formed stacks.
    pub fn step(&mut self) -> io::Result<()> {
        let op = Opcode::decode(self.program[self.pc]);
        trace!(pc = self.pc, op = op.name(), depth = self.stack.depth());

        let mut next_pc = self.pc + 1;

        match op {
            Opcode::PushEmpty => self.stack.push(Number::new()),
            Opcode::Drop => {
                self.stack.pop();
            }
            Opcode::Dup => {
                let copy = self.stack.peek(0).clone();
                self.stack.push(copy);
            }
            Opcode::Swap => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                self.stack.push(a);
                self.stack.push(b);
            }
            Opcode::Pick => {
                let depth = self.stack.pop().to_i64() as usize;
                let copy = self.stack.peek(depth).clone();
                self.stack.push(copy);
            }
            Opcode::ReadChar => {
                let byte = self.read_byte()?;
                self.stack.peek_mut(0).push_low(byte);
            }
            Opcode::WriteChar => {
                let mut top = self.stack.pop();
                let byte = top.detach_low().unwrap_or(b'0');
                self.output.write_all(&[byte])?;
            }
            Opcode::Not => {
                let top = self.stack.pop();
                self.stack.push(Number::from_int(i64::from(!top.is_truthy())));
            }
            Opcode::Less => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                self.stack.push(Number::from_int(i64::from(b.lt_numeric(&a))));
            }
            Opcode::Equal => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                self.stack.push(Number::from_int(i64::from(a.eq_numeric(&b))));
            }
            Opcode::PushPc => self.stack.push(Number::from_int(self.pc as i64)),
            Opcode::JumpIf => {
                let target = self.stack.pop();
                let condition = self.stack.pop();
                if condition.is_truthy() {
                    next_pc = self.clamp_target(target.to_i64());
                }
            }
            Opcode::Negate => self.stack.peek_mut(0).negate(),
            Opcode::Abs => self.stack.peek_mut(0).make_absolute(),
            Opcode::SplitLow => {
                let byte = self.stack.peek_mut(0).detach_low().unwrap_or(b'0');
                self.stack.push(Number::from_byte(byte));
            }
            Opcode::Concat => {
                // The popped operand's sign is discarded; only digits move.
                let mut donor = self.stack.pop();
                self.stack.peek_mut(0).digits_mut().append(donor.digits_mut());
            }
            Opcode::Add => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                self.stack.push(a.add(&b));
            }
            Opcode::DumpStack => self.dump_stack()?,
            Opcode::Chr => {
                let code = self.stack.pop().to_i64();
                self.stack.push(Number::from_byte(code as u8));
            }
            Opcode::Ord => {
                let mut top = self.stack.pop();
                let byte = top.detach_low().unwrap_or(b'0');
                self.stack.push(Number::from_int(i64::from(byte)));
            }
            Opcode::Literal(byte) => self.stack.peek_mut(0).push_low(byte),
        }

        self.pc = next_pc;
        Ok(())
    }

    /// Jump targets outside the program clamp to its end, which halts the
    /// run; the machine never reads past the program text.
    fn clamp_target(&self, target: i64) -> usize {
        usize::try_from(target)
            .map_or(self.program.len(), |t| t.min(self.program.len()))
    }

    /// Read one byte from the input stream, substituting [`EOF_SENTINEL`]
    /// at end of input.
    fn read_byte(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        match self.input.read(&mut buf)? {
            0 => Ok(EOF_SENTINEL),
            _ => Ok(buf[0]),
        }
    }

    /// `&`: one line per stack element, top (index 0) first, numbers
    /// formatted most-significant digit first.
    fn dump_stack(&mut self) -> io::Result<()> {
        for (index, number) in self.stack.iter_top_down().enumerate() {
            writeln!(self.output, "{index}: {number}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(program: &str, input: &str) -> (String, OperandStack) {
        let mut output = Vec::new();
        let mut machine = Machine::new(
            program.as_bytes(),
            Cursor::new(input.as_bytes().to_vec()),
            &mut output,
        );
        machine.run().expect("machine run failed");
        let Machine { stack, .. } = machine;
        (String::from_utf8(output).expect("non-utf8 output"), stack)
    }

    #[test]
    fn test_literals_build_top_number() {
        let (_, stack) = run("'123", "");
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.peek(0).to_i64(), 123);
    }

    #[test]
    fn test_push_pc_offsets() {
        let (_, stack) = run("'~~", "");
        // offsets of the two `~` instructions themselves
        assert_eq!(stack.peek(0).to_i64(), 2);
        assert_eq!(stack.peek(1).to_i64(), 1);
    }

    #[test]
    fn test_jump_target_clamps_to_end() {
        // target 99 is far past the end: the run halts instead of reading
        // out of bounds, leaving the rest of the program unexecuted
        let (out, stack) = run("'1'99?'5&", "");
        assert_eq!(out, "");
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_negative_jump_target_halts() {
        let (_, stack) = run("'1'1-?'5", "");
        // the trailing '5 never executes; only the first literal remains
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.peek(0).to_i64(), 1);
    }

    #[test]
    fn test_eof_yields_sentinel() {
        let (_, stack) = run("'.", "");
        assert_eq!(stack.peek(0).digits().front(), Some(&EOF_SENTINEL));
    }

    #[test]
    fn test_write_empty_number_prints_zero() {
        // empty-as-zero policy: `>` on a digitless number emits '0'
        let (out, _) = run("'>", "");
        assert_eq!(out, "0");
    }

    #[test]
    #[should_panic(expected = "operand stack underflow")]
    fn test_pop_on_empty_stack_is_fatal() {
        run(",", "");
    }
}
