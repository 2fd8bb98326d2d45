use crate::a11y::{cycle_focus, restore_focus, trap_focus_in};
use crate::i18n::t;
use std::sync::atomic::{AtomicUsize, Ordering};
use yew::prelude::*;

static MODAL_IDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    /// Element that receives focus again once the dialog goes away.
    #[prop_or_default]
    pub return_focus_id: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let modal_id = use_state(|| MODAL_IDS.fetch_add(1, Ordering::Relaxed));
    let container_id = format!("modal-{}", *modal_id);
    let title_id = format!("modal-title-{}", *modal_id);

    {
        let container_id = container_id.clone();
        let return_focus = props.return_focus_id.clone();
        use_effect_with(props.open, move |is_open| {
            let is_open = *is_open;
            if is_open {
                trap_focus_in(&container_id);
            }
            // runs on close and on unmount alike
            move || {
                if is_open && let Some(id) = return_focus.as_ref() {
                    restore_focus(id);
                }
            }
        });
    }

    if !props.open {
        return Html::default();
    }

    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_keydown = {
        let cb = props.on_close.clone();
        let container_id = container_id.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Escape" => {
                e.prevent_default();
                cb.emit(());
            }
            "Tab" => {
                if cycle_focus(&container_id, e.shift_key()) {
                    e.prevent_default();
                }
            }
            _ => {}
        })
    };

    html! {
        <div class="modal-backdrop" role="presentation" onclick={on_close.clone()}>
            <div
                id={container_id}
                class="modal"
                role="dialog"
                aria-modal="true"
                aria-labelledby={title_id.clone()}
                tabindex="-1"
                onclick={keep_open}
                onkeydown={on_keydown}
            >
                <div class="modal__header">
                    <h2 id={title_id}>{ props.title.clone() }</h2>
                    <button type="button" class="modal__close" aria-label={t("ui.close")} onclick={on_close}>
                        {"×"}
                    </button>
                </div>
                <div class="modal__body">
                    { for props.children.iter() }
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;
    use yew::html::ChildrenRenderer;

    fn props(open: bool) -> Props {
        Props {
            open,
            title: AttrValue::from("Book a Private Session"),
            on_close: Callback::noop(),
            return_focus_id: Some(AttrValue::from("hero-book")),
            children: ChildrenRenderer::default(),
        }
    }

    #[test]
    fn open_modal_is_an_accessible_dialog() {
        let html = block_on(LocalServerRenderer::<Modal>::with_props(props(true)).render());
        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("aria-modal=\"true\""));
        assert!(html.contains("Close dialog"));
        assert!(html.contains("aria-labelledby=\"modal-title-"));
    }

    #[test]
    fn closed_modal_renders_nothing() {
        let html = block_on(LocalServerRenderer::<Modal>::with_props(props(false)).render());
        assert!(!html.contains("modal-backdrop"));
    }
}
