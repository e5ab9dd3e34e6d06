use sequencer::{Diagnostic, DiagnosticSink};

/// Prints diagnostics on the debug serial console.
pub struct Console;

impl DiagnosticSink for Console {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        defmt::println!("{}", defmt::Display2Format(diagnostic));
    }
}
