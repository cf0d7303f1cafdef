use std::fmt::{self, Display};

/// Writes space-separated fields without a leading or doubled separator.
pub(crate) struct SpaceSepFormatter<'a, 'b> {
    out: &'b mut fmt::Formatter<'a>,
    any_written: bool,
}

impl<'a, 'b> SpaceSepFormatter<'a, 'b> {
    pub fn new(out: &'b mut fmt::Formatter<'a>) -> Self {
        Self {
            out,
            any_written: false,
        }
    }

    fn separate(&mut self) -> fmt::Result {
        if self.any_written {
            write!(self.out, " ")?;
        }
        self.any_written = true;
        Ok(())
    }

    pub fn push<T: Display>(&mut self, value: &T) -> fmt::Result {
        self.separate()?;
        write!(self.out, "{value}")
    }

    pub fn push_str(&mut self, text: &str) -> fmt::Result {
        self.separate()?;
        write!(self.out, "{text}")
    }

    pub fn push_pair<T: Display>(&mut self, key: &str, value: &T) -> fmt::Result {
        self.separate()?;
        write!(self.out, "{key} {value}")
    }

    pub fn push_option<T: Display>(&mut self, key: &str, value: Option<T>) -> fmt::Result {
        match value {
            Some(value) => self.push_pair(key, &value),
            None => Ok(()),
        }
    }
}
