//! Browser backend
//!
//! Provides [`MediaElement`](crate::MediaElement) and
//! [`MediaView`](crate::MediaView) over a DOM `<audio>`/`<video>` element.

mod element;

pub use element::{WebMediaElement, WebMediaView};
