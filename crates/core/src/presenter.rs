//! Presenter seam - where the step function hands frames to the outside world
//!
//! The game state never draws or sleeps by itself. It calls a [`Presenter`]
//! with read-only snapshots, in a fixed order, and lets the implementation
//! decide what "showing a frame" and "pausing" mean.

use std::convert::Infallible;
use std::time::Duration;

use crate::snapshot::GameSnapshot;

pub trait Presenter {
    type Error;

    /// Show a frame. Called after every visible mutation.
    fn present(&mut self, frame: &GameSnapshot) -> Result<(), Self::Error>;

    /// Hold the marked lines on screen before they collapse
    fn line_clear_pause(&mut self, pause: Duration) -> Result<(), Self::Error>;
}

/// Presenter that shows nothing and never waits (headless runs, benches)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    type Error = Infallible;

    fn present(&mut self, _frame: &GameSnapshot) -> Result<(), Infallible> {
        Ok(())
    }

    fn line_clear_pause(&mut self, _pause: Duration) -> Result<(), Infallible> {
        Ok(())
    }
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    type Error = P::Error;

    fn present(&mut self, frame: &GameSnapshot) -> Result<(), Self::Error> {
        (**self).present(frame)
    }

    fn line_clear_pause(&mut self, pause: Duration) -> Result<(), Self::Error> {
        (**self).line_clear_pause(pause)
    }
}
