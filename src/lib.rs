pub mod data;
pub mod dom;
pub mod engine;
pub mod rows;
pub mod surface;

use data::{fetch_pairs, scrambled_rights, Pair};
use dom::{classify_click, DomSurface};
use engine::Engine;
use log::warn;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(PartialEq, Clone)]
enum FetchStatus {
    Idle,
    Loading,
    Error(String),
}

#[function_component(App)]
fn app() -> Html {
    let status = use_state(|| FetchStatus::Loading);
    let board = use_state(|| None::<Vec<Pair>>);
    let engine = use_mut_ref(|| None::<Engine<DomSurface>>);
    let container_ref = use_node_ref();

    {
        let status = status.clone();
        let board = board.clone();

        use_effect_with_deps(
            move |_| {
                status.set(FetchStatus::Loading);

                spawn_local(async move {
                    match fetch_pairs().await {
                        Ok(pairs) => {
                            let rights = scrambled_rights(&pairs, &mut rand::thread_rng());
                            let rows = pairs
                                .into_iter()
                                .zip(rights)
                                .map(|(pair, right)| Pair {
                                    left: pair.left,
                                    right,
                                })
                                .collect::<Vec<_>>();
                            board.set(Some(rows));
                            status.set(FetchStatus::Idle);
                        }
                        Err(err) => {
                            status.set(FetchStatus::Error(err.to_string()));
                            board.set(None);
                        }
                    }
                });

                || ()
            },
            (),
        );
    }

    // The engine can only mount once the rows exist in the DOM, so this
    // runs after the render that the board update triggers.
    {
        let engine = engine.clone();
        let container_ref = container_ref.clone();

        use_effect_with_deps(
            move |rows: &Option<Vec<Pair>>| {
                if rows.is_some() {
                    let surface = container_ref
                        .cast::<web_sys::Element>()
                        .and_then(|container| DomSurface::mount(&container));
                    match surface {
                        Some(surface) => *engine.borrow_mut() = Some(Engine::new(surface)),
                        None => warn!("board rendered but no rows found to mount"),
                    }
                }
                || ()
            },
            (*board).clone(),
        );
    }

    let on_click = {
        let engine = engine.clone();
        Callback::from(move |event: MouseEvent| {
            let mut slot = engine.borrow_mut();
            let Some(engine) = slot.as_mut() else {
                return;
            };
            let target = classify_click(&event, engine.surface());
            engine.handle_click(target);
        })
    };

    let body = match &*status {
        FetchStatus::Loading => html! { <p class="notice">{ "Loading pairs…" }</p> },
        FetchStatus::Error(message) => html! { <p class="notice error">{ message }</p> },
        FetchStatus::Idle => {
            let Some(rows) = (*board).as_ref() else {
                return html! { <p class="notice">{ "No pairs available." }</p> };
            };
            html! {
                <div class="container" ref={container_ref} onclick={on_click}>
                    { for rows.iter().enumerate().map(|(index, row)| render_row(index, row)) }
                </div>
            }
        }
    };

    html! {
        <main class="app">
            <h1>{ "Match the pairs" }</h1>
            { body }
        </main>
    }
}

fn render_row(index: usize, row: &Pair) -> Html {
    html! {
        <div class="row" data-row={index.to_string()} key={index}>
            <div class="left-item">{ &row.left }</div>
            <div class="middle-gap nodisplay">{ "→" }</div>
            <div class="right-match">{ &row.right }</div>
        </div>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
