//! Voice output for Chorus agents.
//!
//! Provides the speech synthesis abstraction and the transform that turns an
//! agent's text output into audio before it reaches the transport.

mod speak;
mod tts;

pub use speak::SpeakText;
pub use tts::{MockSynthesizer, SpeechSynthesizer, SpeechTool};
