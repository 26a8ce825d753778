pub mod build;
pub mod classify;
pub mod score;
pub mod sequence;

pub use build::{
    build_click_steps, build_scroll_step, build_sequence_steps, build_steps, build_type_step,
};
pub use classify::{
    classify, find_action_events, is_mouse_down_event, is_scroll_event, is_type_event,
    ClassificationError, ClassifiedEvent,
};
pub use score::{
    max_possible_score, similarity_score, strongest_match, EmptySelectorError, ScoredCandidate,
};
pub use sequence::{group_event_sequences, EventSequence};
