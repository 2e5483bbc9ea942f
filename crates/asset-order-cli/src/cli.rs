// SPDX-License-Identifier: GPL-3.0

use std::{
	fmt::Display,
	io::Result,
	sync::{Arc, Mutex},
};
#[cfg(test)]
pub(crate) use tests::MockCli;

pub(crate) mod traits {
	use std::{fmt::Display, io::Result};

	/// A command line interface.
	pub trait Cli {
		/// Returns whether the output should be in JSON format.
		fn is_json(&self) -> bool;
		/// Prints an error message.
		fn error(&mut self, text: impl Display) -> Result<()>;
		/// Prints an info message.
		fn info(&mut self, text: impl Display) -> Result<()>;
		/// Prints a header of the prompt sequence.
		fn intro(&mut self, title: impl Display) -> Result<()>;
		/// Prints a footer of the prompt sequence.
		fn outro(&mut self, message: impl Display) -> Result<()>;
		/// Prints a footer of the prompt sequence with a failure style.
		fn outro_cancel(&mut self, message: impl Display) -> Result<()>;
		/// Prints a success message.
		fn success(&mut self, message: impl Display) -> Result<()>;
		/// Prints a warning message.
		fn warning(&mut self, message: impl Display) -> Result<()>;
		/// Constructs a new [`Spinner`].
		fn spinner(&mut self) -> Box<dyn Spinner + Send>;
	}

	/// A spinner.
	pub trait Spinner: Send {
		/// Starts the spinner.
		fn start(&self, message: &str);
		/// Stops the spinner.
		fn stop(&self, message: &str);
		/// Stops the spinner with an error message.
		fn error(&self, message: &str);
	}
}

/// A command line interface using cliclack.
pub(crate) struct Cli {
	pub(crate) json: bool,
}

impl Cli {
	// With `--json`, human output moves to stderr so stdout only carries the envelope.
	fn emit(&self, text: impl Display, styled: impl FnOnce(String) -> Result<()>) -> Result<()> {
		if self.json {
			eprintln!("{text}");
			Ok(())
		} else {
			styled(text.to_string())
		}
	}
}

impl traits::Cli for Cli {
	fn is_json(&self) -> bool {
		self.json
	}

	fn error(&mut self, text: impl Display) -> Result<()> {
		self.emit(text, cliclack::log::error)
	}

	fn info(&mut self, text: impl Display) -> Result<()> {
		self.emit(text, cliclack::log::info)
	}

	fn intro(&mut self, title: impl Display) -> Result<()> {
		if self.json {
			return Ok(());
		}
		cliclack::set_theme(crate::style::Theme);
		cliclack::intro(format!("{}: {title}", console::style(" Asset Order ").black().on_magenta()))
	}

	fn outro(&mut self, message: impl Display) -> Result<()> {
		self.emit(message, cliclack::outro)
	}

	fn outro_cancel(&mut self, message: impl Display) -> Result<()> {
		self.emit(message, cliclack::outro_cancel)
	}

	fn success(&mut self, message: impl Display) -> Result<()> {
		self.emit(message, cliclack::log::success)
	}

	fn warning(&mut self, message: impl Display) -> Result<()> {
		self.emit(message, cliclack::log::warning)
	}

	fn spinner(&mut self) -> Box<dyn traits::Spinner + Send> {
		Box::new(Spinner { inner: Arc::new(Mutex::new(None)), json: self.json })
	}
}

/// A spinner using cliclack.
#[derive(Clone)]
struct Spinner {
	inner: Arc<Mutex<Option<cliclack::ProgressBar>>>,
	json: bool,
}

impl traits::Spinner for Spinner {
	fn start(&self, message: &str) {
		if !self.json {
			let s = cliclack::spinner();
			s.start(message);
			if let Ok(mut inner) = self.inner.lock() {
				*inner = Some(s);
			}
		} else {
			eprintln!("{}", message);
		}
	}

	fn stop(&self, message: &str) {
		if let Ok(mut inner) = self.inner.lock() {
			if let Some(s) = inner.take() {
				s.stop(message);
			} else if self.json {
				eprintln!("{}", message);
			}
		}
	}

	fn error(&self, message: &str) {
		if let Ok(mut inner) = self.inner.lock() {
			if let Some(s) = inner.take() {
				s.error(message);
			} else if self.json {
				eprintln!("{}", message);
			}
		}
	}
}
