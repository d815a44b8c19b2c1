//! Client for the places text-search and place-details APIs.
//!
//! [`PlacesClient::text_search`] classifies every search attempt into the
//! closed [`TextSearch`] enum; [`PlacesClient::fetch_detail`] validates each
//! detail record through [`PlaceDetail::from_raw`] and soft-skips anything
//! that fails.

pub mod client;
pub mod detail;
pub mod error;
pub mod types;

pub use client::{PlacesClient, SearchParams, TextSearch, DETAIL_FIELDS, MAX_CANDIDATES};
pub use detail::{DetailError, PlaceDetail, ValidationError};
pub use error::PlacesError;
pub use types::{Geometry, LatLng, OpeningHours, PlaceCandidate, ProviderStatus, RawPlaceDetail};
