//! # Caption Service
//!
//! Request validation, image decoding, and the [`CaptionService`] context.
//!
//! The request pipeline:
//! 1. [`CaptionRequest::image_field`] checks the method and content type,
//!    and extracts the ``image`` data url;
//! 2. [`decode_data_url`] decodes it into an RGB image;
//! 3. [`CaptionService::caption_image`] extracts features, and decodes a caption.
//!
//! [`CaptionService::handle`] maps every failure to a [`CaptionResponse`]
//! with a status code and a public message.

mod caption_service;
pub(crate) mod data_url;
mod request;
mod service_config;

#[doc(inline)]
pub use caption_service::*;
#[doc(inline)]
pub use data_url::decode_data_url;
#[doc(inline)]
pub use request::*;
#[doc(inline)]
pub use service_config::*;
