pub mod advice;
pub mod landmarks;
pub mod locale;
pub mod scores;
pub mod thresholds;
