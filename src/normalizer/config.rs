use phonenumber::country;

/// One entry of the region-fallback priority list.
///
/// `retry_with_trunk_zero` re-parses the input with a prepended `0` when the
/// as-is parse is invalid, for plans where users habitually omit the domestic
/// trunk prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackRegion {
    pub region: country::Id,
    pub retry_with_trunk_zero: bool,
}

impl FallbackRegion {
    pub fn new(region: country::Id) -> Self {
        Self {
            region,
            retry_with_trunk_zero: false,
        }
    }

    pub fn with_trunk_zero_retry(region: country::Id) -> Self {
        Self {
            region,
            retry_with_trunk_zero: true,
        }
    }
}

/// Deployment-specific knobs of the normalizer.
///
/// The fallback list is a priority order reflecting the expected user base,
/// not a property of the algorithm; the default matches the deployment this
/// widget was originally tuned for (UK first, with the trunk-zero retry,
/// then India) but any list can be supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    pub fallback_regions: Vec<FallbackRegion>,
    /// Inputs with fewer significant digits than this are reported as too
    /// short rather than as a format mismatch.
    pub min_significant_digits: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            fallback_regions: vec![
                FallbackRegion::with_trunk_zero_retry(country::Id::GB),
                FallbackRegion::new(country::Id::IN),
            ],
            min_significant_digits: 8,
        }
    }
}
