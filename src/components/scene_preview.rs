//! 3D preview canvas: a wireframe box seen from a draggable orbit camera.
//!
//! SYSTEM CONTEXT
//! ==============
//! Camera math lives in `util::orbit`; this component only owns the canvas,
//! pointer handling, and the redraw loop. The loop stops when the component
//! unmounts, and each frame resizes the backing store to the canvas's layout
//! size so the preview follows window resizes.

use leptos::prelude::*;

use crate::util::orbit::OrbitCamera;

#[cfg(feature = "csr")]
const FRAME_MS: u64 = 33;
#[cfg(feature = "csr")]
const WIRE_COLOR: &str = "#4f8cff";
#[cfg(feature = "csr")]
const BACKGROUND: &str = "#10131a";

#[component]
pub fn ScenePreview() -> impl IntoView {
    let camera = RwSignal::new(OrbitCamera::default());
    let drag_from = RwSignal::new(None::<(f64, f64)>);
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    #[cfg(feature = "csr")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            while alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                if let Some(canvas) = canvas_ref.get_untracked() {
                    draw(&canvas, &camera.get_untracked());
                }
                gloo_timers::future::sleep(std::time::Duration::from_millis(FRAME_MS)).await;
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let on_pointer_down = move |ev: leptos::ev::PointerEvent| {
        drag_from.set(Some((f64::from(ev.client_x()), f64::from(ev.client_y()))));
    };
    let on_pointer_move = move |ev: leptos::ev::PointerEvent| {
        let Some((x0, y0)) = drag_from.get_untracked() else {
            return;
        };
        let (x, y) = (f64::from(ev.client_x()), f64::from(ev.client_y()));
        camera.update(|c| c.drag(x - x0, y - y0));
        drag_from.set(Some((x, y)));
    };
    let on_pointer_up = move |_| drag_from.set(None);

    view! {
        <canvas
            class="scene-preview"
            node_ref=canvas_ref
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointerleave=on_pointer_up
        ></canvas>
    }
}

#[cfg(feature = "csr")]
fn draw(canvas: &web_sys::HtmlCanvasElement, camera: &OrbitCamera) {
    use wasm_bindgen::JsCast;

    let width = u32::try_from(canvas.client_width()).unwrap_or(0);
    let height = u32::try_from(canvas.client_height()).unwrap_or(0);
    if width == 0 || height == 0 {
        return;
    }
    if canvas.width() != width {
        canvas.set_width(width);
    }
    if canvas.height() != height {
        canvas.set_height(height);
    }

    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<web_sys::CanvasRenderingContext2d>().ok())
    else {
        return;
    };

    let (w, h) = (f64::from(width), f64::from(height));
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_stroke_style_str(WIRE_COLOR);
    ctx.set_line_width(1.5);
    ctx.begin_path();
    for (a, b) in crate::util::orbit::wireframe(camera, w, h) {
        ctx.move_to(a.x, a.y);
        ctx.line_to(b.x, b.y);
    }
    ctx.stroke();
}
