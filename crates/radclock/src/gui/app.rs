use crate::config;
use crate::events::AppEvent;
use crate::gui::clock::{self, State};
use crate::gui::theme;
use clockface::Point;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub config_path: Option<PathBuf>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Resize(i32, i32),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    /// Drives the snap animation from the widget's frame clock until the animator goes idle.
    fn run_animation(&self) {
        let state = self.state.clone();
        let first_frame: Cell<Option<i64>> = Cell::new(None);

        self.drawing_area.add_tick_callback(move |area, frame_clock| {
            let now = frame_clock.frame_time();
            let start = first_frame.get().unwrap_or(now);
            first_frame.set(Some(start));
            let elapsed = Duration::from_micros(now.saturating_sub(start).max(0) as u64);

            let mut state = state.borrow_mut();
            if state.tick(elapsed) {
                area.queue_draw();
            }
            if state.is_animating() {
                glib::ControlFlow::Continue
            } else {
                glib::ControlFlow::Break
            }
        });
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        State,
        Option<PathBuf>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("RadClock"),
            set_default_size: (clock::DEFAULT_SIZE, clock::DEFAULT_SIZE),

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "radclock-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerDown(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::PointerMove(Point::new(x + dx, y + dy)));
                        }
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::PointerUp(Point::new(x + dx, y + dy)));
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, config_path, rx) = init;

        theme::load_css();

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            config_path,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, _, _| {
                if let Err(e) = clock::draw(cr, &state_draw.borrow()) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Resize(width, height) => {
                self.state
                    .borrow_mut()
                    .resize(width as f64, height as f64);
                self.drawing_area.queue_draw();
            }
            AppMsg::PointerDown(point) => {
                self.state.borrow_mut().pointer_down(point);
            }
            AppMsg::PointerMove(point) => {
                let outcome = self.state.borrow_mut().pointer_move(point);
                if outcome.animation_started {
                    self.run_animation();
                }
            }
            AppMsg::PointerUp(point) => {
                self.state.borrow_mut().pointer_up(point);
            }
            AppMsg::ConfigReload => match config::load_config(self.config_path.as_deref()) {
                Ok(new_config) => {
                    // a running tick callback sees the fresh, idle clock and stops
                    self.state.borrow_mut().reconfigure(&new_config);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
