pub mod edit;
pub mod poll;

use crate::actix_web::web::{delete, get, post, put, scope, ServiceConfig};
use crate::core::ports::repository::Store;

pub fn configure<S: Store + 'static>(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("polls")
            .route("", get().to(poll::list::<S>))
            .route("", post().to(poll::create::<S>))
            .service(
                scope("{poll_id}")
                    .route("", get().to(poll::detail::<S>))
                    .route("", put().to(poll::update::<S>))
                    .route("", delete().to(poll::delete::<S>))
                    .route("close", put().to(poll::close::<S>))
                    .route("vote", post().to(poll::vote::<S>))
                    .route("results", get().to(poll::results::<S>)),
            ),
    )
    .service(scope("users").route("{user_id}/polls", get().to(poll::user_polls::<S>)))
    .service(
        scope("edits").service(
            scope("{edit_id}")
                .route("", delete().to(edit::cancel::<S>))
                .route("confirm", post().to(edit::confirm::<S>)),
        ),
    );
}

#[cfg(test)]
mod test {
    use super::configure;
    use crate::actix_web::{
        http::StatusCode,
        test::{self, TestRequest},
        web::Data,
        App,
    };
    use crate::config::Config;
    use crate::core::models::poll::Poll;
    use crate::impls::store::memory::MemoryStore;
    use serde_json::{json, Value};

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(Data::new(MemoryStore::new()))
                    .app_data(Data::new(Config::default()))
                    .configure(configure::<MemoryStore>),
            )
            .await
        };
    }

    fn lunch() -> Value {
        json!({
            "title": "Lunch?",
            "description": "Where should we go",
            "options": ["Pizza", "Sushi", "Tacos"],
            "created_by": "user1"
        })
    }

    fn proposal(title: &str, options: &[&str]) -> Value {
        json!({
            "title": title,
            "description": "Where should we go",
            "options": options,
            "is_public": true,
            "allow_multiple_votes": false,
            "expires_at": null
        })
    }

    #[actix_web::test]
    async fn test_create_vote_and_results() {
        let app = app!();
        let req = TestRequest::post().uri("/polls").set_json(lunch()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let poll: Poll = test::read_body_json(resp).await;
        assert!(poll.is_active);

        let req = TestRequest::post()
            .uri(&format!("/polls/{}/vote", poll.id))
            .set_json(json!({ "option_id": poll.options[0].id }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["votes"], 1);
        assert_eq!(body["total_votes"], 1);

        let req = TestRequest::get().uri(&format!("/polls/{}/results", poll.id)).to_request();
        let tally: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(tally["total_votes"], 1);
        assert_eq!(tally["options"][0]["percentage"], 100.0);
        assert_eq!(tally["options"][1]["percentage"], 0.0);
    }

    #[actix_web::test]
    async fn test_create_rejects_single_option() {
        let app = app!();
        let req = TestRequest::post()
            .uri("/polls")
            .set_json(json!({ "title": "Lunch?", "options": ["Pizza", " "], "created_by": "user1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "INSUFFICIENT_OPTIONS");
    }

    #[actix_web::test]
    async fn test_vote_unknown_option() {
        let app = app!();
        let req = TestRequest::post().uri("/polls").set_json(lunch()).to_request();
        let poll: Poll = test::call_and_read_body_json(&app, req).await;
        let req = TestRequest::post()
            .uri(&format!("/polls/{}/vote", poll.id))
            .set_json(json!({ "option_id": uuid::Uuid::new_v4() }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "OPTION_NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_vote_closed_poll() {
        let app = app!();
        let req = TestRequest::post().uri("/polls").set_json(lunch()).to_request();
        let poll: Poll = test::call_and_read_body_json(&app, req).await;
        let req = TestRequest::put().uri(&format!("/polls/{}/close", poll.id)).to_request();
        let closed: Poll = test::call_and_read_body_json(&app, req).await;
        assert!(!closed.is_active);
        let req = TestRequest::post()
            .uri(&format!("/polls/{}/vote", poll.id))
            .set_json(json!({ "option_id": poll.options[0].id }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["error"], "POLL_INACTIVE");
    }

    #[actix_web::test]
    async fn test_edit_without_votes() {
        let app = app!();
        let req = TestRequest::post().uri("/polls").set_json(lunch()).to_request();
        let poll: Poll = test::call_and_read_body_json(&app, req).await;
        let req = TestRequest::put()
            .uri(&format!("/polls/{}", poll.id))
            .set_json(proposal("Lunch?", &["Pizza", "Sushi"]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "applied");
        assert_eq!(body["poll"]["options"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["poll"]["options"][0]["id"], json!(poll.options[0].id));
    }

    #[actix_web::test]
    async fn test_edit_no_changes() {
        let app = app!();
        let req = TestRequest::post().uri("/polls").set_json(lunch()).to_request();
        let poll: Poll = test::call_and_read_body_json(&app, req).await;
        let req = TestRequest::put()
            .uri(&format!("/polls/{}", poll.id))
            .set_json(proposal("Lunch? ", &["Pizza", "Sushi", "Tacos", ""]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "NO_CHANGES_DETECTED");
    }

    #[actix_web::test]
    async fn test_edit_with_votes_needs_confirmation() {
        let app = app!();
        let req = TestRequest::post().uri("/polls").set_json(lunch()).to_request();
        let poll: Poll = test::call_and_read_body_json(&app, req).await;
        let req = TestRequest::post()
            .uri(&format!("/polls/{}/vote", poll.id))
            .set_json(json!({ "option_id": poll.options[2].id }))
            .to_request();
        test::call_service(&app, req).await;

        let req = TestRequest::put()
            .uri(&format!("/polls/{}", poll.id))
            .set_json(proposal("Lunch?", &["Pizza", "Sushi"]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "awaiting_confirmation");
        assert_eq!(body["pending_edit"]["summary"]["discarded_votes"], 1);
        let edit_id = body["pending_edit"]["id"].as_str().unwrap().to_owned();

        let req = TestRequest::get().uri(&format!("/polls/{}", poll.id)).to_request();
        let unchanged: Poll = test::call_and_read_body_json(&app, req).await;
        assert_eq!(unchanged.options.len(), 3);

        let req = TestRequest::post().uri(&format!("/edits/{}/confirm", edit_id)).to_request();
        let edited: Poll = test::call_and_read_body_json(&app, req).await;
        assert_eq!(edited.options.len(), 2);
        assert_eq!(edited.total_votes(), 0);
    }

    #[actix_web::test]
    async fn test_cancel_edit() {
        let app = app!();
        let req = TestRequest::post().uri("/polls").set_json(lunch()).to_request();
        let poll: Poll = test::call_and_read_body_json(&app, req).await;
        let req = TestRequest::post()
            .uri(&format!("/polls/{}/vote", poll.id))
            .set_json(json!({ "option_id": poll.options[0].id }))
            .to_request();
        test::call_service(&app, req).await;
        let req = TestRequest::put()
            .uri(&format!("/polls/{}", poll.id))
            .set_json(proposal("Dinner?", &["Pizza", "Sushi", "Tacos"]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let edit_id = body["pending_edit"]["id"].as_str().unwrap().to_owned();

        let req = TestRequest::delete().uri(&format!("/edits/{}", edit_id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
        let req = TestRequest::post().uri(&format!("/edits/{}/confirm", edit_id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_confirm_stale_edit() {
        let app = app!();
        let req = TestRequest::post().uri("/polls").set_json(lunch()).to_request();
        let poll: Poll = test::call_and_read_body_json(&app, req).await;
        let req = TestRequest::post()
            .uri(&format!("/polls/{}/vote", poll.id))
            .set_json(json!({ "option_id": poll.options[0].id }))
            .to_request();
        test::call_service(&app, req).await;

        let mut edit_ids = Vec::new();
        for title in ["Dinner?", "Brunch?"] {
            let req = TestRequest::put()
                .uri(&format!("/polls/{}", poll.id))
                .set_json(proposal(title, &["Pizza", "Sushi", "Tacos"]))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            edit_ids.push(body["pending_edit"]["id"].as_str().unwrap().to_owned());
        }

        let req = TestRequest::post().uri(&format!("/edits/{}/confirm", edit_ids[1])).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = TestRequest::post().uri(&format!("/edits/{}/confirm", edit_ids[0])).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "STALE_EDIT");
    }

    #[actix_web::test]
    async fn test_confirm_after_close() {
        let app = app!();
        let req = TestRequest::post().uri("/polls").set_json(lunch()).to_request();
        let poll: Poll = test::call_and_read_body_json(&app, req).await;
        let req = TestRequest::post()
            .uri(&format!("/polls/{}/vote", poll.id))
            .set_json(json!({ "option_id": poll.options[0].id }))
            .to_request();
        test::call_service(&app, req).await;
        let req = TestRequest::put()
            .uri(&format!("/polls/{}", poll.id))
            .set_json(proposal("Dinner?", &["Pizza", "Sushi", "Tacos"]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let edit_id = body["pending_edit"]["id"].as_str().unwrap().to_owned();

        let req = TestRequest::put().uri(&format!("/polls/{}/close", poll.id)).to_request();
        test::call_service(&app, req).await;
        let req = TestRequest::post().uri(&format!("/edits/{}/confirm", edit_id)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "POLL_INACTIVE");
    }

    #[actix_web::test]
    async fn test_list_user_polls_and_delete() {
        let app = app!();
        let req = TestRequest::post().uri("/polls").set_json(lunch()).to_request();
        let poll: Poll = test::call_and_read_body_json(&app, req).await;

        let req = TestRequest::get().uri("/polls?page=1&size=10").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);

        let req = TestRequest::get().uri("/users/user1/polls").to_request();
        let polls: Vec<Poll> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(polls.len(), 1);

        let req = TestRequest::delete().uri(&format!("/polls/{}", poll.id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = TestRequest::get().uri(&format!("/polls/{}", poll.id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
