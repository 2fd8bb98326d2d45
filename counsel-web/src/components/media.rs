use crate::content::{Book, VideoEmbed};
use crate::i18n::t;
use crate::paths::asset_path;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub video: VideoEmbed,
    pub books: Vec<Book>,
}

/// Guidance & Reflections: the featured video and the author's books.
#[function_component(ContentMedia)]
pub fn content_media(p: &Props) -> Html {
    html! {
        <section id="media" class="media" aria-labelledby="media-title">
            <h2 id="media-title">{ t("media.title") }</h2>
            <p class="media__subtitle">{ t("media.subtitle") }</p>
            <div class="media__video">
                <iframe
                    src={p.video.embed_url()}
                    title={p.video.title.clone()}
                    loading="lazy"
                    allow="accelerometer; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                    allowfullscreen="true"
                />
            </div>
            <h3>{ t("media.books_title") }</h3>
            <ul class="media__books">
                { for p.books.iter().map(book_card) }
            </ul>
        </section>
    }
}

fn book_card(book: &Book) -> Html {
    html! {
        <li class="book-card">
            <img src={asset_path(&book.image)} alt={book.title.clone()} loading="lazy" />
            <p class="book-card__title">{ book.title.clone() }</p>
            if let Some(link) = book.purchase_link() {
                <a class="btn btn-outline" href={link.to_string()} target="_blank" rel="noopener noreferrer">
                    { t("media.buy") }
                </a>
            }
        </li>
    }
}
