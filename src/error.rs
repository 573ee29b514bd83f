#[derive(PartialEq, Eq, Clone, Copy)]
pub struct Error {
	pub kind: ErrorKind,
	pub message: &'static str,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ErrorKind {
	InvalidArgument,
	BufferTooSmall,
	ParseError,
	InvalidBase,
}

impl std::fmt::Debug for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Error").field("kind", &self.kind).field("message", &self.message).finish()
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let kind = match self.kind {
			ErrorKind::InvalidArgument => "invalid argument",
			ErrorKind::BufferTooSmall => "buffer too small",
			ErrorKind::ParseError => "parse error",
			ErrorKind::InvalidBase => "invalid base",
		};
		write!(f, "{}: {}", kind, self.message)
	}
}

impl std::error::Error for Error {}

impl Error {
	pub fn new(kind: ErrorKind, msg: &'static str) -> Self {
		Self { kind, message: msg }
	}

	pub fn new_invalid_argument(msg: &'static str) -> Self {
		Self::new(ErrorKind::InvalidArgument, msg)
	}

	pub fn new_buffer_too_small(msg: &'static str) -> Self {
		Self::new(ErrorKind::BufferTooSmall, msg)
	}

	pub fn new_invalid_base(msg: &'static str) -> Self {
		Self::new(ErrorKind::InvalidBase, msg)
	}

	pub fn new_parse_error(msg: &'static str) -> Self {
		Self::new(ErrorKind::ParseError, msg)
	}
}

#[inline(always)]
pub fn assert(what: bool, err: fn() -> Error) -> Result<(), Error> {
	if what { Ok(()) } else { Err(err()) }
}
