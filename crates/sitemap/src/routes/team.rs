use route_codec::matcher::{MatcherExt, delete, get, path, post, segment};
use route_codec::{OneOf, case, one_of, sequence};

use crate::ids::{TeamInviteId, UserId};

/// Routes below `/team`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamRoute {
    /// `GET /team/invites/{id}`
    ShowInvite(TeamInviteId),
    /// `POST /team/invites/{id}`, same path as [`TeamRoute::ShowInvite`].
    AcceptInvite(TeamInviteId),
    /// `POST /team/leave`
    Leave,
    /// `DELETE /team/members/{id}`
    RemoveTeammate(UserId),
}

pub(crate) fn team_routes() -> OneOf<TeamRoute> {
    one_of()
        .or(sequence()
            .skip(get())
            .skip(path("invites"))
            .take(segment::<TeamInviteId>())
            .map(case!(TeamRoute::ShowInvite(id))))
        .or(sequence()
            .skip(post())
            .skip(path("invites"))
            .take(segment::<TeamInviteId>())
            .map(case!(TeamRoute::AcceptInvite(id))))
        .or(sequence().skip(post()).skip(path("leave")).map(case!(TeamRoute::Leave)))
        .or(sequence()
            .skip(delete())
            .skip(path("members"))
            .take(segment::<UserId>())
            .map(case!(TeamRoute::RemoveTeammate(id))))
}
