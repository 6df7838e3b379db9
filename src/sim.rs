//! Desktop simulation of the watch platform.
//!
//! Events are queued and dispatched one at a time, each to completion. After
//! every event the watch's outbox is drained; weather requests go to the
//! companion, whose replies are queued as inbound messages.

use std::collections::VecDeque;

use chrono::{Duration, NaiveDateTime};
use embedded_graphics::prelude::Size;
use log::{debug, warn};

use compact_info_lib::{
    assets::BuiltinAssets,
    companion::{settings_message, wants_weather},
    config::Config,
    handlers::{self, Host},
    icons::IconResource,
    message::AppMessage,
    raster::Raster,
    settings::Settings,
    state::RenderState,
    text::{FontFace, MonoMeasure, TextExtent, TextMeasure},
};

/// Minutes between one-percent battery drops.
pub const DRAIN_INTERVAL_MINUTES: i64 = 10;

pub struct SimHost {
    now: NaiveDateTime,
    battery: u8,
    assets: BuiltinAssets,
    outbox: Vec<AppMessage>,
    redraws: usize,
}

impl SimHost {
    pub fn new(now: NaiveDateTime, battery: u8) -> Self {
        SimHost {
            now,
            battery: battery.min(100),
            assets: BuiltinAssets::new(),
            outbox: Vec::new(),
            redraws: 0,
        }
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }

    fn take_outbox(&mut self) -> Vec<AppMessage> {
        std::mem::take(&mut self.outbox)
    }
}

impl TextMeasure for SimHost {
    fn measure_text(&self, text: &str, font: FontFace, bounds: Size) -> TextExtent {
        MonoMeasure.measure_text(text, font, bounds)
    }
}

impl Host for SimHost {
    fn now(&self) -> NaiveDateTime {
        self.now
    }

    fn battery_percent(&self) -> u8 {
        self.battery
    }

    fn fetch_asset_raster(&mut self, resource: IconResource) -> Option<Raster> {
        match self.assets.load(resource) {
            Ok(raster) => Some(raster),
            Err(e) => {
                warn!("Could not decode {}: {}", resource, e);
                None
            }
        }
    }

    fn send(&mut self, message: AppMessage) {
        self.outbox.push(message);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Tick(NaiveDateTime),
    Battery(u8),
    Message(AppMessage),
}

pub struct Simulation {
    state: RenderState,
    host: SimHost,
    queue: VecDeque<Event>,
    start: NaiveDateTime,
    settings_push: AppMessage,
}

impl Simulation {
    pub fn new(config: &Config, start: NaiveDateTime, battery: u8) -> Self {
        Simulation {
            state: RenderState::with_settings(config.display.size(), Settings::default()),
            host: SimHost::new(start, battery),
            queue: VecDeque::new(),
            start,
            settings_push: settings_message(&config.watchface),
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn host(&self) -> &SimHost {
        &self.host
    }

    /// Start the watchface and run `minutes` minute ticks.
    ///
    /// `companion` answers a weather request for the given unit (true for
    /// Celsius) with a reply message, or `None` when no weather is available.
    pub fn run<C>(&mut self, minutes: u32, mut companion: C)
    where
        C: FnMut(bool) -> Option<AppMessage>,
    {
        handlers::on_start(&mut self.state, &mut self.host);
        self.queue.push_back(Event::Message(self.settings_push.clone()));
        self.pump(&mut companion);

        for minute in 1..=i64::from(minutes) {
            let now = self.start + Duration::minutes(minute);
            self.queue.push_back(Event::Tick(now));
            if minute % DRAIN_INTERVAL_MINUTES == 0 {
                let percent = self.host.battery.saturating_sub(1);
                self.queue.push_back(Event::Battery(percent));
            }
            self.pump(&mut companion);
        }
    }

    /// Queue an event for the next dispatch.
    pub fn push(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Dispatch queued events until none are left.
    pub fn pump<C>(&mut self, companion: &mut C)
    where
        C: FnMut(bool) -> Option<AppMessage>,
    {
        while let Some(event) = self.queue.pop_front() {
            self.dispatch(event);

            for outbound in self.host.take_outbox() {
                if !wants_weather(&outbound) {
                    debug!("Companion ignores {:?}", outbound);
                    continue;
                }
                if let Some(reply) = companion(self.state.settings.use_celsius) {
                    self.queue.push_back(Event::Message(reply));
                }
            }
        }
    }

    fn dispatch(&mut self, event: Event) {
        match event {
            Event::Tick(now) => {
                self.host.now = now;
                handlers::on_tick(&mut self.state, &mut self.host, now);
            }
            Event::Battery(percent) => {
                self.host.battery = percent.min(100);
                handlers::on_battery(&mut self.state, &mut self.host, percent);
            }
            Event::Message(message) => {
                handlers::on_message(&mut self.state, &mut self.host, &message);
            }
        }
    }

    /// Release every owned raster.
    pub fn shutdown(&mut self) -> usize {
        handlers::on_shutdown(&mut self.state)
    }
}
