//! Services module - the pattern-learning and classification engine.
//!
//! Everything here is a pure computation over in-memory [`ClassSet`](crate::models::ClassSet)s:
//! no file I/O, no global state. Extraction of class names from files lives in
//! [`crate::extract`], persistence in [`crate::config`].
//!
//! # Components
//!
//! - [`PrefixGrouper`]: clusters classes into families sharing a structural prefix
//!   (`text-gray-100`, `text-gray-200` → `text-gray`)
//! - [`synthesis::synthesize`]: turns one family into an anchored, generalizing [`Pattern`](crate::models::Pattern)
//! - [`PatternCatalogue`]: curated utility patterns merged in behind learned ones
//! - [`Trainer`]: runs the three steps above and produces a [`Configuration`](crate::models::Configuration)
//! - [`Classifier`]: checks a target set against a configuration (ignored → literal → pattern)
//! - [`compare_directly`]: exact set comparison without any training
//! - [`analyze_redundancy`]: finds classes defined by several stylesheets
//!
//! # Usage Example
//!
//! ```
//! use cssguard::models::class_set;
//! use cssguard::services::{Classifier, Trainer};
//!
//! let css = class_set(["text-gray-100", "text-gray-200", "text-gray-300", "card"]);
//! let config = Trainer::default().train(&css);
//!
//! let classifier = Classifier::new(config).unwrap();
//! let result = classifier.classify(&class_set(["text-gray-900", "card", "made-up"]));
//!
//! assert_eq!(result.matched, 2);
//! assert_eq!(result.orphans, vec!["made-up"]);
//! ```

pub mod catalogue;
pub mod classifier;
pub mod direct;
pub mod grouping;
pub mod redundancy;
pub mod synthesis;
pub mod trainer;

pub use catalogue::PatternCatalogue;
pub use classifier::{Classifier, ClassifierError, Verdict};
pub use direct::compare_directly;
pub use grouping::PrefixGrouper;
pub use redundancy::{FilePair, RedundancyReport, analyze_redundancy, find_removable};
pub use trainer::{Trainer, TrainingError};
