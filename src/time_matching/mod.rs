//! Resolves what the map shows at a given instant.
//!
//! Measurements and predictions use different matching rules on purpose: observed
//! data is matched to the nearest capture time within a tolerance, forecasts only at
//! their exact forecast instant. Each rule is its own strategy type.

pub mod historical;
pub mod prediction;
pub mod timeline;
