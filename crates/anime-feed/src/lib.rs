//! Client library for a third-party anime listing API.
//!
//! Upstream responses are reshaped into the records defined in
//! [`shared::models`]. Failed requests never surface as errors; they yield
//! placeholder data of the same shape, tagged as such through [`Fetched`].

pub mod api;
pub mod carousel;
pub mod fallback;
pub mod normalize;
pub mod slug;

pub use api::{AnimeApiClient, Endpoint, FetchError, Fetched};
pub use carousel::{AutoCarousel, Carousel, FeaturedAnime};
