use core::fmt;

use kiln_reflect::Peek;

use crate::PrettyPrinter;

/// A value paired with the printer that renders it, for use with `{}`
pub struct PrettyDisplay<'mem> {
    peek: Peek<'mem>,
    printer: PrettyPrinter,
}

impl fmt::Display for PrettyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.printer.format_to(self.peek, f)
    }
}

/// Adds pretty-printing to [`Peek`]
pub trait PeekPretty<'mem> {
    /// Renders with the default printer
    fn pretty(&self) -> PrettyDisplay<'mem>;

    /// Renders with `printer`
    fn pretty_with(&self, printer: PrettyPrinter) -> PrettyDisplay<'mem>;
}

impl<'mem> PeekPretty<'mem> for Peek<'mem> {
    fn pretty(&self) -> PrettyDisplay<'mem> {
        self.pretty_with(PrettyPrinter::default())
    }

    fn pretty_with(&self, printer: PrettyPrinter) -> PrettyDisplay<'mem> {
        PrettyDisplay {
            peek: *self,
            printer,
        }
    }
}
