//! Event loop glue between the host and the watchface

use chrono::NaiveDateTime;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

use crate::{
    compositor::Compositor,
    config::DisplayConfig,
    host::{Error, TickHandler, WindowHandlers},
    strip::StripBuffer,
    time::{ClockTime, TimeUnits},
    ui::Watchface,
};

/// Events delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The window was pushed onto the screen
    Show,
    /// The window left the screen
    Hide,
    /// A subscribed time unit changed
    Tick { time: ClockTime, units: TimeUnits },
}

/// The watchface running inside a [`Compositor`].
pub struct App {
    host: Compositor,
    face: Watchface,
}

impl App {
    pub fn new(config: DisplayConfig) -> Self {
        let host = Compositor::new(config);
        let face = Watchface::for_host(&host);
        Self { host, face }
    }

    pub fn host(&self) -> &Compositor {
        &self.host
    }

    pub fn face(&self) -> &Watchface {
        &self.face
    }

    /// Hand one event to the watchface. Only showing can fail.
    pub fn dispatch(&mut self, event: Event) -> Result<(), Error> {
        match event {
            Event::Show => self.face.on_show(&mut self.host)?,
            Event::Hide => self.face.on_hide(&mut self.host),
            Event::Tick { time, units } => self.face.on_tick(&mut self.host, time, units),
        }
        Ok(())
    }

    /// Show the watchface.
    pub fn launch(&mut self) -> Result<(), Error> {
        self.dispatch(Event::Show)
    }

    /// Hide the watchface before the process ends.
    pub fn exit(&mut self) {
        self.face.on_hide(&mut self.host);
    }

    /// Feed the wall clock to the tick timer and deliver a tick if one is due.
    /// Return whether a tick was delivered.
    pub fn advance(&mut self, now: NaiveDateTime) -> bool {
        match self.host.poll_tick(now) {
            Some(units) => {
                let time = ClockTime::from_time(&now);
                self.face.on_tick(&mut self.host, time, units);
                true
            }
            None => false,
        }
    }

    /// Run the host's redraw pass. Return whether anything was painted.
    pub fn render<D>(&mut self, target: &mut D, now: ClockTime) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.host.render(&mut self.face, target, now)
    }

    /// Run the host's redraw pass through `strip`, so `target` only ever
    /// receives finished pixels.
    pub fn render_strips<D, const W: usize, const R: usize>(
        &mut self,
        target: &mut D,
        now: ClockTime,
        strip: &mut StripBuffer<W, R>,
    ) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.host.render_strips(&mut self.face, target, now, strip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::PINETIME,
        host::Host,
        palette::DARK_GRAY,
        testing::{CountingPanel, FrameBuffer},
    };
    use chrono::{Duration, NaiveDate};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_opt(10, 8, 0)
            .unwrap()
    }

    #[test]
    fn launch_paints_the_first_frame() {
        let mut app = App::new(PINETIME);
        let mut frame = FrameBuffer::new(PINETIME.size, Rgb565::BLUE);

        // Nothing to draw before the window is shown
        assert_eq!(app.render(&mut frame, ClockTime::default()), Ok(false));

        app.launch().unwrap();
        assert_eq!(app.host().stack().len(), 3);
        assert_eq!(
            app.render(&mut frame, ClockTime::from_time(&start())),
            Ok(true)
        );
        assert_eq!(frame.pixel(Point::new(30, 30)), DARK_GRAY);
        assert_eq!(
            app.render(&mut frame, ClockTime::from_time(&start())),
            Ok(false)
        );
    }

    #[test]
    fn one_redraw_per_second() {
        let mut app = App::new(PINETIME);
        let mut frame = FrameBuffer::new(PINETIME.size, Rgb565::BLUE);
        app.launch().unwrap();
        app.render(&mut frame, ClockTime::default()).unwrap();

        // Poll ten times a second for five seconds
        let mut ticks = 0;
        for step in 0..50 {
            let now = start() + Duration::milliseconds(step * 100);
            if app.advance(now) {
                ticks += 1;
            }
            app.render(&mut frame, ClockTime::from_time(&now)).unwrap();
        }

        // The first reading only sets the reference
        assert_eq!(ticks, 4);
        assert_eq!(app.host().frames(), 5);
    }

    #[test]
    fn ticks_mark_the_window_dirty() {
        let mut app = App::new(PINETIME);
        let mut frame = FrameBuffer::new(PINETIME.size, Rgb565::BLUE);
        app.launch().unwrap();
        app.render(&mut frame, ClockTime::default()).unwrap();
        assert!(!app.host().is_dirty());

        assert!(!app.advance(start()));
        assert!(!app.host().is_dirty());
        assert!(app.advance(start() + Duration::seconds(1)));
        assert!(app.host().is_dirty());
    }

    #[test]
    fn strips_write_each_panel_pixel_once() {
        let mut app = App::new(PINETIME);
        let mut panel = CountingPanel::new(PINETIME.size);
        let mut strip = StripBuffer::<240, 16>::new();
        app.launch().unwrap();

        let time = ClockTime::from_time(&start());
        for second in 0..3 {
            app.advance(start() + Duration::seconds(second));
            panel.next_pass();
            assert_eq!(app.render_strips(&mut panel, time, &mut strip), Ok(true));
            assert_eq!(panel.conflicts(), 0);
            assert_eq!(panel.max_writes(), 1);
            assert_eq!(panel.untouched(), 0);
        }

        // Same picture as painting the layers one over the other
        let mut direct = App::new(PINETIME);
        let mut frame = FrameBuffer::new(PINETIME.size, Rgb565::BLUE);
        direct.launch().unwrap();
        direct.render(&mut frame, time).unwrap();
        for y in 0..240 {
            assert_eq!(panel.frame().row(y), frame.row(y), "row {y}");
        }
    }

    #[test]
    fn direct_render_repaints_pixels() {
        let mut app = App::new(PINETIME);
        let mut panel = CountingPanel::new(PINETIME.size);
        app.launch().unwrap();
        app.render(&mut panel, ClockTime::from_time(&start())).unwrap();
        // The fill is painted over by the dial and the hands
        assert!(panel.conflicts() > 0);
    }

    #[test]
    fn exit_releases_everything() {
        let mut app = App::new(PINETIME);
        app.launch().unwrap();
        app.exit();
        assert!(!app.face().is_loaded());
        assert_eq!(app.host().live_layers(), 0);
        assert_eq!(app.host().live_bitmaps(), 0);
        assert!(app.host().stack().is_empty());
        assert_eq!(app.host().subscription(), None);

        // Ticks stop once hidden
        assert!(!app.advance(start()));
        assert!(!app.advance(start() + Duration::seconds(1)));
    }

    #[test]
    fn relaunch_reuses_slots() {
        let mut app = App::new(PINETIME);
        app.launch().unwrap();
        let layers = app.face().layers();
        app.exit();
        app.launch().unwrap();
        assert_eq!(app.face().layers(), layers);
        assert_eq!(app.host().live_layers(), 3);
        assert_eq!(app.host().live_bitmaps(), 1);
        assert_eq!(app.host().subscription(), Some(TimeUnits::SECOND));
    }

    #[test]
    fn root_matches_the_display() {
        let app = App::new(PINETIME);
        assert_eq!(app.host().root_bounds().size, Size::new(240, 240));
        assert!(app.host().supports_color());
    }
}
