//! geotag-survey - geolocation records from drone survey imagery
//!
//! Reads the EXIF GPS tags embedded in drone JPEGs, converts them to
//! calibrated decimal degrees and assembles one GeoJSON-style feature
//! record per image.
//!
//! # Examples
//!
//! ## Extracting a single image
//!
//! ```no_run
//! use geotag_survey::{extract, Yaw};
//!
//! let bytes = std::fs::read("DJI_0001.JPG")?;
//! let geolocation = extract(&bytes)?;
//!
//! if let Some(position) = geolocation.position {
//!     println!("{}, {}", position.latitude, position.longitude);
//! }
//! if let Yaw::Degrees(heading) = geolocation.yaw {
//!     println!("heading {}", heading);
//! }
//! # Ok::<(), geotag_survey::Error>(())
//! ```
//!
//! ## Ingesting a survey directory
//!
//! ```no_run
//! use geotag_survey::{ingest_directory, FeatureCollection};
//!
//! let report = ingest_directory("survey/07-17-2024".as_ref(), Some(5))?;
//! let collection = FeatureCollection::new(&report.records);
//! println!("{}", serde_json::to_string_pretty(&collection).unwrap());
//! # Ok::<(), geotag_survey::Error>(())
//! ```

pub mod io;
pub mod error;
pub mod types;
pub mod formats;
pub mod geo;
pub mod record;
pub mod ingest;
pub mod store;
pub mod config;
pub mod api;

pub use error::{Error, Result};
pub use types::Rational;
pub use formats::{find_exif_payload, ExifData, ExifReader, IFD, IFDEntry, IfdKind};
pub use geo::{convert, extract, ConversionError, GeolocationRecord, Hemisphere, Position, Yaw};
pub use record::{assemble, FeatureCollection, FeatureRecord};
pub use ingest::{ingest, ingest_batch, ingest_directory, scan_directory, BatchReport};
pub use store::{FeatureStore, MemoryStore, StoredFeature};
pub use config::{AppState, ServerConfig};
pub use io::{ByteOrder, SeekableReader};
