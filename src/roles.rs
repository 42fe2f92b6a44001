//! Role-based view selection
//!
//! The identity provider hands over a set of role claims; this module picks
//! the landing view and the views a user may open. Token formats stay with
//! the caller.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;

/// Roles recognised by the dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Admin,
    Facilitator,
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim() {
            "Admin" => Ok(Role::Admin),
            "Facilitator" => Ok(Role::Facilitator),
            other => bail!("unknown role claim '{}'", other),
        }
    }
}

/// Views reachable in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    AdminDashboard,
    CreateStory,
    FacilitatorDashboard,
}

impl View {
    pub fn path(self) -> &'static str {
        match self {
            View::Home => "/",
            View::AdminDashboard => "/admin",
            View::CreateStory => "/create-story",
            View::FacilitatorDashboard => "/facilitator",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Known roles among the claims, unknown claims ignored
pub fn roles_from_claims<S: AsRef<str>>(claims: &[S]) -> Vec<Role> {
    let mut roles: Vec<Role> = claims
        .iter()
        .filter_map(|claim| claim.as_ref().parse().ok())
        .collect();
    roles.sort_unstable();
    roles.dedup();
    roles
}

/// View to land on after sign-in. Admin takes precedence over Facilitator.
pub fn landing_view<S: AsRef<str>>(claims: &[S]) -> View {
    let roles = roles_from_claims(claims);
    if roles.contains(&Role::Admin) {
        View::AdminDashboard
    } else if roles.contains(&Role::Facilitator) {
        View::FacilitatorDashboard
    } else {
        View::Home
    }
}

/// Every view the claims grant access to, landing page included
pub fn accessible_views<S: AsRef<str>>(claims: &[S]) -> Vec<View> {
    let mut views = vec![View::Home];
    for role in roles_from_claims(claims) {
        match role {
            Role::Admin => views.extend([View::AdminDashboard, View::CreateStory]),
            Role::Facilitator => views.push(View::FacilitatorDashboard),
        }
    }
    views
}

/// Whether `view` may be opened; anything else redirects to the landing view
pub fn can_access<S: AsRef<str>>(claims: &[S], view: View) -> bool {
    accessible_views(claims).contains(&view)
}
