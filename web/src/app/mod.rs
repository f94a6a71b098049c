use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use tilesweep_core::input::Keys;
use tilesweep_core::{Phase, Session, vram};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};
use yew::prelude::*;

use crate::app::console::WebConsole;
use crate::app::utils::*;

mod audio;
mod console;
mod keymap;
mod utils;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Frame,
    Key(Keys, bool),
    Blur,
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Fixed seed for every game, random when unset.
    #[prop_or_default]
    pub(crate) seed: Option<u32>,
    #[prop_or_default]
    pub(crate) mute: bool,
}

pub(crate) struct GameView {
    session: Session,
    console: WebConsole,
    canvas: NodeRef,
    context: Option<CanvasRenderingContext2d>,
    _frame_interval: Interval,
    _listeners: [EventListener; 3],
}

impl GameView {
    /// Close to the 59.73 Hz of the original display.
    const FRAME_MILLIS: u32 = 16;

    fn create_session(props: &GameProps) -> Session {
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("New session, seed {:#010x}", seed);
        Session::with_seed(seed)
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(Self::FRAME_MILLIS, move || link.send_message(Msg::Frame))
    }

    fn key_listener(
        ctx: &Context<Self>,
        event_type: &'static str,
        pressed: bool,
    ) -> EventListener {
        let link = ctx.link().clone();
        EventListener::new(&gloo::utils::window(), event_type, move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(keys) = keymap::keys_for(&event.code()) {
                event.prevent_default();
                link.send_message(Msg::Key(keys, pressed));
            }
        })
    }

    fn create_listeners(ctx: &Context<Self>) -> [EventListener; 3] {
        let link = ctx.link().clone();
        let blur = EventListener::new(&gloo::utils::window(), "blur", move |_| {
            link.send_message(Msg::Blur)
        });
        [
            Self::key_listener(ctx, "keydown", true),
            Self::key_listener(ctx, "keyup", false),
            blur,
        ]
    }

    fn canvas_context(&self) -> anyhow::Result<CanvasRenderingContext2d> {
        use anyhow::Context as _;
        let canvas = self
            .canvas
            .cast::<HtmlCanvasElement>()
            .context("Canvas is not mounted")?;
        canvas
            .get_context("2d")
            .map_err(js_error)?
            .context("Canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|object| js_error(object.into()))
    }

    fn status(&self) -> &'static str {
        match self.session.phase() {
            Phase::Setup | Phase::AwaitingFirstReveal => "Pick a starting cell",
            Phase::Playing => "Sweeping",
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            session: Self::create_session(ctx.props()),
            console: WebConsole::new(ctx.props().mute),
            canvas: NodeRef::default(),
            context: None,
            _frame_interval: Self::create_timer(ctx),
            _listeners: Self::create_listeners(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Frame => {
                let phase = self.session.phase();
                self.session.tick(&mut self.console);
                let drawn = match &self.context {
                    Some(context) => self.console.present(context),
                    None => Ok(()),
                };
                if let Err(err) = drawn {
                    log::error!("Could not draw frame: {:#}", err);
                    self.context = None;
                }
                // only the status line depends on the session
                phase != self.session.phase()
            }
            Key(keys, pressed) => {
                log::trace!("{:?} {}", keys, if pressed { "down" } else { "up" });
                self.console.set_key(keys, pressed);
                false
            }
            Blur => {
                self.console.release_all();
                false
            }
            NewGame => {
                self.session = Self::create_session(ctx.props());
                true
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            match self.canvas_context() {
                Ok(context) => self.context = Some(context),
                Err(err) => log::error!("Could not set up canvas: {:#}", err),
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <div class="tilesweep">
                <nav>
                    <span>{self.status()}</span>
                    <button onclick={cb_new_game}>{"New game"}</button>
                </nav>
                <canvas
                    ref={self.canvas.clone()}
                    width={vram::SCREEN_WIDTH.to_string()}
                    height={vram::SCREEN_HEIGHT.to_string()}
                />
            </div>
        }
    }
}
