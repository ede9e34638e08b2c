pub mod classify;
pub mod speed;
pub mod travel;

pub use classify::{classify_errors, ErrorBreakdown};
pub use speed::{accurate_words_per_minute, words_per_minute};
pub use travel::challenge_rot_travel;
