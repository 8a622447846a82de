//! Greeting library exercised by the `LibTest` and `LibIT` test groups.
//!
//! Each greeting is written to a caller-supplied sink so tests can capture
//! the exact bytes produced.

pub mod groups;

use std::io::{self, Write};

/// The greetings the library can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    /// Greeting used by integration tests.
    It,
    /// Greeting used by unit tests.
    Test,
}

impl Greeting {
    /// Returns the greeting text, including its trailing newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use balau_hello::Greeting;
    ///
    /// assert_eq!(Greeting::It.text(), "Hello, IT world.\n");
    /// ```
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::It => "Hello, IT world.\n",
            Self::Test => "Hello, Test world.\n",
        }
    }

    /// Writes the greeting to `sink`.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `sink`.
    pub fn write_to<W: Write + ?Sized>(self, sink: &mut W) -> io::Result<()> {
        sink.write_all(self.text().as_bytes())
    }
}

/// Writes `"Hello, IT world.\n"` to `sink`.
///
/// # Errors
///
/// Propagates any error returned by `sink`.
pub fn hello_it<W: Write + ?Sized>(sink: &mut W) -> io::Result<()> {
    Greeting::It.write_to(sink)
}

/// Writes `"Hello, Test world.\n"` to `sink`.
///
/// # Errors
///
/// Propagates any error returned by `sink`.
///
/// # Examples
///
/// ```
/// let mut sink = Vec::new();
/// balau_hello::hello_test(&mut sink)?;
/// assert_eq!(sink, b"Hello, Test world.\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn hello_test<W: Write + ?Sized>(sink: &mut W) -> io::Result<()> {
    Greeting::Test.write_to(sink)
}
