use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    /// Landing page with the booking overlay already open.
    #[at("/book")]
    Book,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    /// Whether the booking overlay starts open on this route.
    #[must_use]
    pub const fn opens_booking(&self) -> bool {
        matches!(self, Self::Book)
    }
}

#[cfg(test)]
mod tests {
    use super::Route;
    use yew_router::Routable;

    #[test]
    fn booking_deep_link_is_recognised() {
        assert_eq!(Route::recognize("/book"), Some(Route::Book));
        assert!(Route::Book.opens_booking());
        assert!(!Route::Home.opens_booking());
    }

    #[test]
    fn unknown_paths_fall_back_to_not_found() {
        assert_eq!(Route::recognize("/pricing"), Some(Route::NotFound));
        assert!(!Route::NotFound.opens_booking());
        assert_eq!(Route::Home.to_path(), "/");
    }
}
