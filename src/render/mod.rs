pub mod report;
pub mod result_view;

pub use report::{save_results, text_report, SavedResults};
pub use result_view::{format_confidence, render, Accent, ResultCard, ResultView, Tone, Verdict};
