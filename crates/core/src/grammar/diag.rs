pub use zpl_label_diagnostics::{Diagnostic, Severity, Span, codes};
