mod dashboard;
mod health;
mod index;
mod library;
mod login;
mod logout;
mod play;
mod user;
mod views;

use askama::Template;
use axum::response::Html;

use crate::error::AppResult;

pub use dashboard::dashboard_route;
pub use health::{Healthz, healthz_route};
pub use index::{index_route, seriald_route};
pub use library::{movies_route, show_route, shows_route};
pub use login::{login_form_route, login_route};
pub use logout::logout_route;
pub use play::play_route;
pub use user::user_route;
pub use views::views_route;

fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}
