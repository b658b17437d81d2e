//! Disposition of invalid images

pub mod handler;

pub use handler::{
    delete_invalid_image, move_invalid_image, Action, Disposition, DispositionOutcome,
};
