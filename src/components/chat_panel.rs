//! Chat column: transcript plus the message input.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders `ChatState` from context and hands submitted lines to
//! `net::chat`. Assistant replies are markdown; user text is shown verbatim.

#[cfg(test)]
#[path = "chat_panel_test.rs"]
mod chat_panel_test;

use leptos::prelude::*;
use pulldown_cmark::{Event, Options, Parser, html};

use crate::config::AppConfig;
use crate::gallery::GalleryBridge;
use crate::state::auth::AuthState;
use crate::state::chat::{ChatState, Sender};

/// Chat panel showing the conversation and a message input.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let bridge = expect_context::<GalleryBridge>();
    let config = expect_context::<AppConfig>();

    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let state = chat.get();
        let _ = state.messages.len();
        let _ = state.typing;

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    let do_send = move || {
        let text = input.get_untracked();
        input.set(String::new());

        #[cfg(feature = "csr")]
        crate::net::chat::submit(&text, chat, auth, bridge.clone(), config.clone());

        #[cfg(not(feature = "csr"))]
        let _ = (text, auth, &bridge, &config);
    };
    let do_send = StoredValue::new(do_send);

    let on_click = move |_| do_send.with_value(|send| send());

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send.with_value(|send| send());
        }
    };

    let placeholder = move || {
        if chat.get().sending { "Working on it..." } else { "Type a message..." }
    };

    view! {
        <div class="chat-panel">
            <div class="chat-panel__header">"Chat"</div>
            <div class="chat-panel__messages" node_ref=messages_ref>
                {move || {
                    chat.get()
                        .messages
                        .into_iter()
                        .map(|msg| {
                            let is_user = msg.sender == Sender::User;
                            let is_system = msg.sender == Sender::System;
                            view! {
                                <div
                                    class="chat-panel__message"
                                    class:chat-panel__message--user=is_user
                                    class:chat-panel__message--system=is_system
                                >
                                    {if is_user {
                                        view! { <span>{msg.content}</span> }.into_any()
                                    } else {
                                        let rendered = render_markdown_html(&msg.content);
                                        view! {
                                            <div class="chat-panel__markdown" inner_html=rendered></div>
                                        }
                                            .into_any()
                                    }}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                }}

                {move || {
                    chat.get()
                        .typing
                        .then(|| view! { <div class="chat-panel__typing">"Rose is typing..."</div> })
                }}
            </div>

            <div class="chat-panel__input-row">
                <input
                    class="chat-panel__input"
                    type="text"
                    placeholder=placeholder
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button
                    class="btn btn--primary chat-panel__send"
                    on:click=on_click
                    disabled=move || input.get().trim().is_empty()
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}

/// Render assistant markdown to HTML with raw HTML dropped.
fn render_markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
