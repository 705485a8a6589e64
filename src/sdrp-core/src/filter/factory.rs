// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::collections::HashMap;

use tracing::debug;

use super::{
    ButterworthFilter, Filter, FilterConfig, FilterKind, MedianFilter, MovingAverageFilter,
};
use crate::error::{DspError, DspResult};

pub type FilterConstructor = fn() -> Box<dyn Filter>;

/// Registry of filter engines keyed by kind.
///
/// `create` validates first and hands back an already configured engine, or
/// nothing at all.
#[derive(Clone)]
pub struct FilterFactory {
    constructors: HashMap<FilterKind, FilterConstructor>,
}

impl FilterFactory {
    /// Create a registry with no engines.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create a registry with the moving-average, median and Butterworth engines.
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory.register(FilterKind::MovingAverage, moving_average_constructor);
        factory.register(FilterKind::Median, median_constructor);
        factory.register(FilterKind::Butterworth, butterworth_constructor);
        factory
    }

    /// Register (or replace) the constructor for `kind`.
    pub fn register(&mut self, kind: FilterKind, constructor: FilterConstructor) {
        self.constructors.insert(kind, constructor);
    }

    pub fn is_registered(&self, kind: FilterKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Registered kinds, sorted.
    pub fn registered_kinds(&self) -> Vec<FilterKind> {
        let mut kinds: Vec<FilterKind> = self.constructors.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Build and configure a `kind` engine from `config`.
    ///
    /// `kind` takes precedence over `config.kind`.
    pub fn create(&self, kind: FilterKind, config: &FilterConfig) -> DspResult<Box<dyn Filter>> {
        let constructor = self
            .constructors
            .get(&kind)
            .ok_or_else(|| DspError::UnknownKind(kind.to_string()))?;
        config.validate_for(kind)?;
        let mut filter = constructor();
        filter.configure(&config.with_kind(kind))?;
        debug!("created {} filter", kind);
        Ok(filter)
    }

    /// Like [`FilterFactory::create`] with a free-form name such as
    /// `"Moving-Average"`.
    pub fn create_by_name(&self, name: &str, config: &FilterConfig) -> DspResult<Box<dyn Filter>> {
        let kind: FilterKind = name.parse()?;
        self.create(kind, config)
    }
}

impl Default for FilterFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn moving_average_constructor() -> Box<dyn Filter> {
    Box::new(MovingAverageFilter::new())
}

fn median_constructor() -> Box<dyn Filter> {
    Box::new(MedianFilter::new())
}

fn butterworth_constructor() -> Box<dyn Filter> {
    Box::new(ButterworthFilter::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_kinds_registered() {
        let factory = FilterFactory::new();
        assert_eq!(
            factory.registered_kinds(),
            vec![
                FilterKind::MovingAverage,
                FilterKind::Median,
                FilterKind::Butterworth
            ]
        );
        for kind in FilterKind::ALL {
            assert!(factory.is_registered(kind));
        }
    }

    #[test]
    fn test_create_returns_configured_engine() {
        let factory = FilterFactory::new();
        let mut filter = factory
            .create(FilterKind::Median, &FilterConfig::median(4))
            .expect("create");
        assert_eq!(filter.kind(), FilterKind::Median);
        assert_eq!(filter.config().and_then(|c| c.window_size), Some(5));
        assert_eq!(filter.process(&[1.0, 2.0, 3.0]).expect("process").len(), 3);
    }

    #[test]
    fn test_requested_kind_wins() {
        let factory = FilterFactory::new();
        let filter = factory
            .create(FilterKind::MovingAverage, &FilterConfig::median(3))
            .expect("create");
        assert_eq!(filter.kind(), FilterKind::MovingAverage);
        assert_eq!(
            filter.config().map(|c| c.kind),
            Some(FilterKind::MovingAverage)
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let factory = FilterFactory::new();
        assert!(matches!(
            factory.create(FilterKind::Butterworth, &FilterConfig::moving_average(3)),
            Err(DspError::InvalidConfig(_))
        ));
        assert!(matches!(
            factory.create(
                FilterKind::Butterworth,
                &FilterConfig::butterworth(4, 30000.0, 44100.0)
            ),
            Err(DspError::InvalidConfig(_))
        ));
        assert!(matches!(
            factory.create(
                FilterKind::Butterworth,
                &FilterConfig::butterworth(usize::MAX, 1000.0, 44100.0)
            ),
            Err(DspError::InvalidConfig(_))
        ));
        assert!(matches!(
            factory.create(FilterKind::Median, &FilterConfig::median(usize::MAX)),
            Err(DspError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unknown_kinds() {
        let empty = FilterFactory::empty();
        assert!(matches!(
            empty.create(FilterKind::Median, &FilterConfig::median(3)),
            Err(DspError::UnknownKind(_))
        ));
        assert!(empty.registered_kinds().is_empty());

        let factory = FilterFactory::default();
        assert!(matches!(
            factory.create_by_name("wiener", &FilterConfig::median(3)),
            Err(DspError::UnknownKind(name)) if name == "wiener"
        ));
        let filter = factory
            .create_by_name("Moving-Average", &FilterConfig::moving_average(2))
            .expect("by name");
        assert_eq!(filter.kind(), FilterKind::MovingAverage);
    }

    #[test]
    fn test_register_replaces_constructor() {
        let mut factory = FilterFactory::empty();
        factory.register(FilterKind::Median, moving_average_constructor);
        let filter = factory
            .create(FilterKind::Median, &FilterConfig::median(3))
            .expect("create");
        // The replacement engine reports its own kind.
        assert_eq!(filter.kind(), FilterKind::MovingAverage);
    }
}
