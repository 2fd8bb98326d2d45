use crate::content::SocialLink;
use crate::i18n::{t, tr1};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub socials: Vec<SocialLink>,
    pub year: i32,
}

#[function_component(Footer)]
pub fn footer(p: &Props) -> Html {
    let year = p.year.to_string();
    html! {
        <footer role="contentinfo" class="site-footer">
            <p class="site-name">{ t("site.name") }</p>
            <p class="site-tagline">{ t("site.tagline") }</p>
            <p class="footer__trust">{ t("footer.trust") }</p>
            <nav class="footer__social">
                { for p.socials.iter().map(|link| html! {
                    <a href={link.url.clone()} target="_blank" rel="noopener noreferrer">
                        { t(link.network.label_key()) }
                    </a>
                }) }
            </nav>
            <p class="footer__disclaimer">{ t("footer.disclaimer") }</p>
            <p class="footer__copyright">{ tr1("footer.copyright", "year", &year) }</p>
        </footer>
    }
}
