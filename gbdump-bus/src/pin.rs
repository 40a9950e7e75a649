//! The electrical line contract every backend implements.

/// Electrical direction of a line, seen from this side of the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    /// High impedance; the other side may drive the line.
    Input,
    /// Driven by us.
    Output,
}

/// One GPIO line.
///
/// Operations are infallible at this level: a mis-wired line reads as a
/// legitimate zero, so there is nothing useful to report. Backends that can
/// fail internally log the failure.
pub trait Pin {
    /// Current level of the line (true = high).
    fn read(&mut self) -> bool;

    /// Drive the line high. On an input line this sets the level the line
    /// will take when it next becomes an output.
    fn set_high(&mut self);

    /// Drive the line low.
    fn set_low(&mut self);

    /// Drive the line to `high`.
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Release the line so the other side can drive it.
    fn set_input_mode(&mut self);

    /// Take over the line at the level last set, without passing through
    /// any other level.
    fn set_output_mode(&mut self);

    fn set_mode(&mut self, mode: PinMode) {
        match mode {
            PinMode::Input => self.set_input_mode(),
            PinMode::Output => self.set_output_mode(),
        }
    }
}

impl<P: Pin + ?Sized> Pin for Box<P> {
    fn read(&mut self) -> bool {
        (**self).read()
    }

    fn set_high(&mut self) {
        (**self).set_high()
    }

    fn set_low(&mut self) {
        (**self).set_low()
    }

    fn set_input_mode(&mut self) {
        (**self).set_input_mode()
    }

    fn set_output_mode(&mut self) {
        (**self).set_output_mode()
    }
}
