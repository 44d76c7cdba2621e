//! Live date/time and connectivity
//!
//! The settings screen shows the current date and time for the selected
//! region. Time comes from an online service when reachable and from the local
//! clock shifted to the country's offset otherwise; the displayed value then
//! advances by one minute per tick while online.

pub mod http;

pub use http::{HttpProbe, WorldTimeSource};

use crate::locale::LocaleFormatter;
use crate::prefs::Country;
use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, Timelike, Utc};

/// Message shown in place of live data while offline
pub const OFFLINE_MESSAGE: &str = "Please Connect To Internet!";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_online(&self) -> bool;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimeSource: Send + Sync {
    async fn now(&self) -> anyhow::Result<DateTime<FixedOffset>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

/// Online/offline state that reports only transitions
#[derive(Debug, Clone)]
pub struct ConnectivityMonitor {
    online: bool,
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self { online: true }
    }
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Record an observation; `Some` only when the state changed
    pub fn observe(&mut self, online: bool) -> Option<Connectivity> {
        if self.online == online {
            return None;
        }
        self.online = online;
        if online {
            tracing::info!("Connection restored");
            Some(Connectivity::Online)
        } else {
            tracing::info!("Connection lost");
            Some(Connectivity::Offline)
        }
    }

    pub async fn check(&mut self, probe: &dyn ConnectivityProbe) -> Option<Connectivity> {
        let online = probe.is_online().await;
        self.observe(online)
    }

    pub fn status_message(&self) -> Option<&'static str> {
        (!self.online).then_some(OFFLINE_MESSAGE)
    }
}

/// Where the clock's current value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    Remote,
    Local,
}

/// The region's current date and time
#[derive(Debug, Clone)]
pub struct LiveClock {
    current: DateTime<FixedOffset>,
    source: ClockSource,
}

impl LiveClock {
    /// A clock reading the local time of `country`
    pub fn local(country: &Country) -> Self {
        Self {
            current: local_time(country, Utc::now()),
            source: ClockSource::Local,
        }
    }

    pub fn at(current: DateTime<FixedOffset>, source: ClockSource) -> Self {
        Self { current, source }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.current
    }

    pub fn source(&self) -> ClockSource {
        self.source
    }

    /// Look the time up, falling back to the local clock for `country`
    pub async fn refresh(&mut self, source: &dyn TimeSource, country: &Country) -> ClockSource {
        match source.now().await {
            Ok(time) => {
                self.current = time;
                self.source = ClockSource::Remote;
            }
            Err(e) => {
                tracing::debug!("Time lookup failed, using local clock: {:#}", e);
                self.current = local_time(country, Utc::now());
                self.source = ClockSource::Local;
            }
        }
        self.source
    }

    /// Advance one minute
    pub fn tick(&mut self) {
        self.current += Duration::minutes(1);
    }

    /// Hour shown on the clock icon, 1 through 12
    pub fn icon_hour(&self) -> u32 {
        match self.current.hour() % 12 {
            0 => 12,
            h => h,
        }
    }

    /// Formatted (date, time) pair
    pub fn display(&self, formatter: &LocaleFormatter) -> (String, String) {
        let local = self.current.naive_local();
        (
            formatter.format_date(&local, None),
            formatter.format_time(&local, None),
        )
    }
}

/// `now` shifted to the representative offset of `country`
pub fn local_time(country: &Country, now: DateTime<Utc>) -> DateTime<FixedOffset> {
    match FixedOffset::east_opt(country.utc_offset_minutes * 60) {
        Some(offset) => now.with_timezone(&offset),
        None => now.fixed_offset(),
    }
}

/// Connectivity and clock, driven together
pub struct LiveData {
    pub monitor: ConnectivityMonitor,
    pub clock: LiveClock,
}

impl LiveData {
    pub fn new(country: &Country) -> Self {
        Self {
            monitor: ConnectivityMonitor::new(),
            clock: LiveClock::local(country),
        }
    }

    /// Probe connectivity; on regaining the connection refresh the clock
    pub async fn poll(
        &mut self,
        probe: &dyn ConnectivityProbe,
        source: &dyn TimeSource,
        country: &Country,
    ) -> Option<Connectivity> {
        let change = self.monitor.check(probe).await;
        if change == Some(Connectivity::Online) {
            self.clock.refresh(source, country).await;
        }
        change
    }

    /// Refresh the clock if online
    pub async fn refresh(&mut self, source: &dyn TimeSource, country: &Country) {
        if self.monitor.is_online() {
            self.clock.refresh(source, country).await;
        }
    }

    /// Minute tick; the clock only advances while online
    pub fn tick(&mut self) {
        if self.monitor.is_online() {
            self.clock.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::countries;
    use chrono::TimeZone;

    fn india() -> &'static Country {
        countries::find("in").unwrap()
    }

    #[test]
    fn test_monitor_reports_only_transitions() {
        let mut monitor = ConnectivityMonitor::new();
        assert_eq!(monitor.observe(true), None);
        assert_eq!(monitor.observe(false), Some(Connectivity::Offline));
        assert_eq!(monitor.observe(false), None);
        assert_eq!(monitor.status_message(), Some(OFFLINE_MESSAGE));
        assert_eq!(monitor.observe(true), Some(Connectivity::Online));
        assert_eq!(monitor.status_message(), None);
    }

    #[tokio::test]
    async fn test_check_uses_probe() {
        let mut probe = MockConnectivityProbe::new();
        probe.expect_is_online().times(1).return_const(false);

        let mut monitor = ConnectivityMonitor::new();
        assert_eq!(monitor.check(&probe).await, Some(Connectivity::Offline));
        assert!(!monitor.is_online());
    }

    #[tokio::test]
    async fn test_refresh_prefers_remote_time() {
        let remote = FixedOffset::east_opt(330 * 60)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 7, 16, 5, 0)
            .unwrap();
        let mut source = MockTimeSource::new();
        source.expect_now().times(1).returning(move || Ok(remote));

        let mut clock = LiveClock::local(india());
        assert_eq!(clock.refresh(&source, india()).await, ClockSource::Remote);
        assert_eq!(clock.now(), remote);
        assert_eq!(clock.icon_hour(), 4);
    }

    #[tokio::test]
    async fn test_refresh_falls_back_to_country_offset() {
        let mut source = MockTimeSource::new();
        source
            .expect_now()
            .times(1)
            .returning(|| Err(anyhow::anyhow!("unreachable")));

        let us = countries::find("us").unwrap();
        let mut clock = LiveClock::local(india());
        assert_eq!(clock.refresh(&source, us).await, ClockSource::Local);
        assert_eq!(clock.now().offset().local_minus_utc(), -300 * 60);
    }

    #[test]
    fn test_tick_and_icon_hour() {
        let midnight = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 7, 23, 59, 0)
            .unwrap();
        let mut clock = LiveClock::at(midnight, ClockSource::Remote);
        assert_eq!(clock.icon_hour(), 11);
        clock.tick();
        assert_eq!(clock.now().hour(), 0);
        assert_eq!(clock.icon_hour(), 12);
    }

    #[test]
    fn test_local_time_offset() {
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 10, 0, 0).unwrap();
        let local = local_time(india(), now);
        assert_eq!(local.hour(), 15);
        assert_eq!(local.minute(), 30);
    }

    #[test]
    fn test_display_uses_formatter() {
        let time = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 7, 0, 5, 0)
            .unwrap();
        let clock = LiveClock::at(time, ClockSource::Remote);
        let (date, clock_time) = clock.display(&LocaleFormatter::default());
        assert_eq!(date, "07-03-2025");
        assert_eq!(clock_time, "12:05 AM");
    }

    #[tokio::test]
    async fn test_offline_clock_does_not_tick() {
        let mut probe = MockConnectivityProbe::new();
        probe.expect_is_online().return_const(false);
        let source = MockTimeSource::new();

        let mut live = LiveData::new(india());
        assert_eq!(
            live.poll(&probe, &source, india()).await,
            Some(Connectivity::Offline)
        );
        let before = live.clock.now();
        live.tick();
        assert_eq!(live.clock.now(), before);
    }
}
