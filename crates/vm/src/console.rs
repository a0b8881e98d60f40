use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Read, Stdin, Stdout, Write};

/// Byte-oriented console the machine talks to through Output and Input.
///
/// The console is handed to the VM at construction so the process streams,
/// an in-memory buffer or anything else can sit behind the same two calls.
pub trait Console: fmt::Debug {
    /// Emits one byte. The byte must be visible to the reader before the
    /// next instruction runs, so implementations do not hold it back.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Blocks until one byte is available. `Ok(None)` means end of input.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Console over an arbitrary reader/writer pair.
pub struct StreamConsole<R, W> {
    input: R,
    output: W,
}

impl<R: Read, W: Write> StreamConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl StreamConsole<Stdin, Stdout> {
    /// Console bound to the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R, W> fmt::Debug for StreamConsole<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamConsole").finish_non_exhaustive()
    }
}

impl<R: Read, W: Write> Console for StreamConsole<R, W> {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.write_all(&[byte])?;
        self.output.flush()
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// In-memory console: input is drained from a queue, output is collected.
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}

impl Console for BufferConsole {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);
        Ok(())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }
}
