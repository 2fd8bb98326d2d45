use counsel_core::ServiceIcon;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub icon: ServiceIcon,
}

/// Decorative line icon for a service card.
#[function_component(ServiceGlyph)]
pub fn service_glyph(p: &Props) -> Html {
    let path = match p.icon {
        ServiceIcon::Education => "M22 10 12 5 2 10l10 5 10-5zM6 12v5c3 2 9 2 12 0v-5",
        ServiceIcon::Heart => {
            "M19 14c1.5-1.5 3-3.2 3-5.5A5.5 5.5 0 0 0 16.5 3c-1.8 0-3 .5-4.5 2-1.5-1.5-2.7-2-4.5-2A5.5 5.5 0 0 0 2 8.5c0 2.3 1.5 4 3 5.5l7 7z"
        }
        ServiceIcon::Compass => "M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20zm4.2 5.8-2.1 6.3-6.3 2.1 2.1-6.3z",
    };
    html! {
        <svg class="service-icon" viewBox="0 0 24 24" width="32" height="32" fill="none"
            stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"
            aria-hidden="true" focusable="false">
            <path d={path} />
        </svg>
    }
}
