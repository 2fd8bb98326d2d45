use crate::i18n::t;
use crate::paths::asset_path;
use yew::prelude::*;

const BIO_KEYS: [&str; 5] = [
    "about.bio.p1",
    "about.bio.p2",
    "about.bio.p3",
    "about.bio.p4",
    "about.bio.p5",
];

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Portrait path relative to the site root.
    pub portrait: AttrValue,
}

#[function_component(About)]
pub fn about(p: &Props) -> Html {
    let portrait = asset_path(&p.portrait);
    html! {
        <section id="about" class="about" aria-labelledby="about-title">
            <img class="about__portrait" src={portrait} alt={t("about.portrait_alt")} loading="lazy" />
            <div class="about__bio">
                <h2 id="about-title">{ t("about.title") }</h2>
                { for BIO_KEYS.iter().map(|key| html! { <p>{ t(key) }</p> }) }
            </div>
        </section>
    }
}
