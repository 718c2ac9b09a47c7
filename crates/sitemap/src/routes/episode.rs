use route_codec::matcher::{MatcherExt, get, path, post, query, query_or};
use route_codec::{OneOf, case, one_of, sequence};

/// Routes below `/episodes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeRoute {
    /// `GET /episodes/{id}`
    Show,
    /// `POST /episodes/{id}/progress?percent=..`, sent by the video player.
    Progress { percent: u8 },
    /// `GET /episodes/{id}/comments`, `page` defaults to 1.
    Comments { page: u32 },
}

pub(crate) fn episode_routes() -> OneOf<EpisodeRoute> {
    one_of()
        .or(sequence().skip(get()).map(case!(EpisodeRoute::Show)))
        .or(sequence()
            .skip(post())
            .skip(path("progress"))
            .take(query::<u8>("percent"))
            .map(case!(EpisodeRoute::Progress { percent })))
        .or(sequence()
            .skip(get())
            .skip(path("comments"))
            .take(query_or("page", 1_u32))
            .map(case!(EpisodeRoute::Comments { page })))
}
