//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Problem Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_problem() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(unique_user_id()).unwrap();

    let request = CreateProblemRequest::unique();
    let response = server
        .post_auth("/api/v1/problems", &token, &request)
        .await
        .unwrap();
    let created: ProblemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.title, request.title);
    assert_eq!(created.upvotes, 0);
    assert_eq!(created.investors, 0);
    assert_eq!(created.builders, 0);
    assert_eq!(created.followers, 0);

    // Reads are public
    let response = server
        .get(&format!("/api/v1/problems/{}", created.id))
        .await
        .unwrap();
    let fetched: ProblemResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title, request.title);
}

#[tokio::test]
async fn test_create_problem_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let request = CreateProblemRequest::unique();
    let response = server.post("/api/v1/problems", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_list_problems_pagination() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(unique_user_id()).unwrap();

    // Ensure at least three problems exist
    for _ in 0..3 {
        let request = CreateProblemRequest::unique();
        let response = server
            .post_auth("/api/v1/problems", &token, &request)
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.get("/api/v1/problems?limit=2").await.unwrap();
    let page: Paginated<ProblemResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.pagination.limit, 2);
    assert!(page.pagination.has_more);

    // Newest first
    let first: i64 = page.data[0].id.parse().unwrap();
    let second: i64 = page.data[1].id.parse().unwrap();
    assert!(first > second);
}

#[tokio::test]
async fn test_update_problem_author_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author_token = server.token_for(unique_user_id()).unwrap();
    let other_token = server.token_for(unique_user_id()).unwrap();

    let request = CreateProblemRequest::unique();
    let response = server
        .post_auth("/api/v1/problems", &author_token, &request)
        .await
        .unwrap();
    let problem: ProblemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // A different user cannot edit
    let response = server
        .patch_auth(
            &format!("/api/v1/problems/{}", problem.id),
            &other_token,
            &UpdateProblemRequest::title("Hijacked"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // The author can
    let response = server
        .patch_auth(
            &format!("/api/v1/problems/{}", problem.id),
            &author_token,
            &UpdateProblemRequest::title("Sharper title"),
        )
        .await
        .unwrap();
    let updated: ProblemResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Sharper title");
}

#[tokio::test]
async fn test_update_problem_ignores_counter_fields() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author_token = server.token_for(unique_user_id()).unwrap();
    let voter_token = server.token_for(unique_user_id()).unwrap();

    let request = CreateProblemRequest::unique();
    let response = server
        .post_auth("/api/v1/problems", &author_token, &request)
        .await
        .unwrap();
    let problem: ProblemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // One real upvote
    let response = server
        .post_auth(
            &format!("/api/v1/engagement-targets/{}/upvote", problem.id),
            &voter_token,
            &(),
        )
        .await
        .unwrap();
    let engagement: EngagementResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(engagement.count, 1);

    // Counter fields in the request body have nowhere to land
    let body = serde_json::json!({
        "title": "Still one upvote",
        "upvotes": 9000,
        "followers": 500,
    });
    let response = server
        .patch_auth(&format!("/api/v1/problems/{}", problem.id), &author_token, &body)
        .await
        .unwrap();
    let updated: ProblemResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(updated.title, "Still one upvote");
    assert_eq!(updated.upvotes, 1);
    assert_eq!(updated.followers, 0);
}

#[tokio::test]
async fn test_delete_problem() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author_token = server.token_for(unique_user_id()).unwrap();
    let other_token = server.token_for(unique_user_id()).unwrap();

    let request = CreateProblemRequest::unique();
    let response = server
        .post_auth("/api/v1/problems", &author_token, &request)
        .await
        .unwrap();
    let problem: ProblemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Only the author can delete
    let response = server
        .delete_auth(&format!("/api/v1/problems/{}", problem.id), &other_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/problems/{}", problem.id), &author_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Verify deleted
    let response = server
        .get(&format!("/api/v1/problems/{}", problem.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_list_comments() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(unique_user_id()).unwrap();

    let request = CreateProblemRequest::unique();
    let response = server
        .post_auth("/api/v1/problems", &token, &request)
        .await
        .unwrap();
    let problem: ProblemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    for body in ["first", "second"] {
        let response = server
            .post_auth(
                &format!("/api/v1/problems/{}/comments", problem.id),
                &token,
                &CreateCommentRequest::simple(body),
            )
            .await
            .unwrap();
        let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(comment.body, body);
        assert_eq!(comment.upvotes, 0);
    }

    // Oldest first
    let response = server
        .get(&format!("/api/v1/problems/{}/comments", problem.id))
        .await
        .unwrap();
    let page: Paginated<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].body, "first");
    assert_eq!(page.data[1].body, "second");
}

#[tokio::test]
async fn test_comment_on_missing_problem() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(unique_user_id()).unwrap();

    let missing_id = unique_user_id();
    let response = server
        .post_auth(
            &format!("/api/v1/problems/{}/comments", missing_id),
            &token,
            &CreateCommentRequest::simple("into the void"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Engagement Tests
// ============================================================================

#[tokio::test]
async fn test_upvote_toggle_walkthrough() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user1 = server.token_for(unique_user_id()).unwrap();
    let user2 = server.token_for(unique_user_id()).unwrap();

    let request = CreateProblemRequest::unique();
    let response = server
        .post_auth("/api/v1/problems", &user1, &request)
        .await
        .unwrap();
    let problem: ProblemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/v1/engagement-targets/{}/upvote", problem.id);

    // First user engages
    let response = server.post_auth(&path, &user1, &()).await.unwrap();
    let state: EngagementResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(state.engaged);
    assert_eq!(state.count, 1);

    // Second user engages
    let response = server.post_auth(&path, &user2, &()).await.unwrap();
    let state: EngagementResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(state.engaged);
    assert_eq!(state.count, 2);

    // First user disengages
    let response = server.post_auth(&path, &user1, &()).await.unwrap();
    let state: EngagementResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!state.engaged);
    assert_eq!(state.count, 1);

    // The stored counter matches
    let response = server
        .get(&format!("/api/v1/problems/{}", problem.id))
        .await
        .unwrap();
    let fetched: ProblemResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.upvotes, 1);

    // Anonymous readers see the count but no engagement
    let response = server.get(&path).await.unwrap();
    let state: EngagementResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!state.engaged);
    assert_eq!(state.count, 1);

    // The remaining voter still reads engaged
    let response = server.get_auth(&path, &user2).await.unwrap();
    let state: EngagementResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(state.engaged);
    assert_eq!(state.count, 1);
}

#[tokio::test]
async fn test_toggle_is_involution() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(unique_user_id()).unwrap();

    let request = CreateProblemRequest::unique();
    let response = server
        .post_auth("/api/v1/problems", &token, &request)
        .await
        .unwrap();
    let problem: ProblemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/v1/engagement-targets/{}/follow", problem.id);

    let response = server.post_auth(&path, &token, &()).await.unwrap();
    let state: EngagementResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(state.engaged);
    assert_eq!(state.count, 1);

    let response = server.post_auth(&path, &token, &()).await.unwrap();
    let state: EngagementResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!state.engaged);
    assert_eq!(state.count, 0);

    let response = server.get_auth(&path, &token).await.unwrap();
    let state: EngagementResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!state.engaged);
    assert_eq!(state.count, 0);
}

#[tokio::test]
async fn test_toggle_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(unique_user_id()).unwrap();

    let request = CreateProblemRequest::unique();
    let response = server
        .post_auth("/api/v1/problems", &token, &request)
        .await
        .unwrap();
    let problem: ProblemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/v1/engagement-targets/{}/upvote", problem.id);

    let response = server.post(&path, &()).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "MISSING_AUTHORIZATION");

    // Nothing was recorded
    let response = server.get(&path).await.unwrap();
    let state: EngagementResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!state.engaged);
    assert_eq!(state.count, 0);
}

#[tokio::test]
async fn test_toggle_unknown_target() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(unique_user_id()).unwrap();

    // A snowflake that was never issued to a problem or comment
    let missing_id = unique_user_id();
    let response = server
        .post_auth(
            &format!("/api/v1/engagement-targets/{}/upvote", missing_id),
            &token,
            &(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_toggle_unknown_kind() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(unique_user_id()).unwrap();

    let request = CreateProblemRequest::unique();
    let response = server
        .post_auth("/api/v1/problems", &token, &request)
        .await
        .unwrap();
    let problem: ProblemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/engagement-targets/{}/boost", problem.id),
            &token,
            &(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_comment_supports_upvote_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(unique_user_id()).unwrap();

    let request = CreateProblemRequest::unique();
    let response = server
        .post_auth("/api/v1/problems", &token, &request)
        .await
        .unwrap();
    let problem: ProblemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/problems/{}/comments", problem.id),
            &token,
            &CreateCommentRequest::simple("useful remark"),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Invest is a problem-only engagement
    let response = server
        .post_auth(
            &format!("/api/v1/engagement-targets/{}/invest", comment.id),
            &token,
            &(),
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "UNSUPPORTED_ENGAGEMENT");

    // Upvoting the comment works
    let response = server
        .post_auth(
            &format!("/api/v1/engagement-targets/{}/upvote", comment.id),
            &token,
            &(),
        )
        .await
        .unwrap();
    let state: EngagementResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(state.engaged);
    assert_eq!(state.count, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_toggles_converge() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author_token = server.token_for(unique_user_id()).unwrap();

    let request = CreateProblemRequest::unique();
    let response = server
        .post_auth("/api/v1/problems", &author_token, &request)
        .await
        .unwrap();
    let problem: ProblemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/v1/engagement-targets/{}/upvote", problem.id);

    // Six users engage at once
    let mut handles = Vec::new();
    for _ in 0..6 {
        let token = server.token_for(unique_user_id()).unwrap();
        let client = server.client.clone();
        let url = format!("{}{}", server.base_url(), path);
        handles.push(tokio::spawn(async move {
            client
                .post(&url)
                .header("Authorization", format!("Bearer {}", token))
                .json(&())
                .send()
                .await
        }));
    }

    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Counter and ledger agree on the total
    let response = server.get(&path).await.unwrap();
    let state: EngagementResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(state.count, 6);

    let response = server
        .get(&format!("/api/v1/problems/{}", problem.id))
        .await
        .unwrap();
    let fetched: ProblemResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.upvotes, 6);
}

#[tokio::test]
async fn test_delete_problem_drops_engagement_targets() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author_token = server.token_for(unique_user_id()).unwrap();
    let voter_token = server.token_for(unique_user_id()).unwrap();

    let request = CreateProblemRequest::unique();
    let response = server
        .post_auth("/api/v1/problems", &author_token, &request)
        .await
        .unwrap();
    let problem: ProblemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/problems/{}/comments", problem.id),
            &author_token,
            &CreateCommentRequest::simple("soon gone"),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Engage with both the problem and its comment
    let response = server
        .post_auth(
            &format!("/api/v1/engagement-targets/{}/follow", problem.id),
            &voter_token,
            &(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/engagement-targets/{}/upvote", comment.id),
            &voter_token,
            &(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Deleting the problem takes the comment and every engagement target with it
    let response = server
        .delete_auth(&format!("/api/v1/problems/{}", problem.id), &author_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get(&format!("/api/v1/engagement-targets/{}/follow", problem.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get(&format!("/api/v1/engagement-targets/{}/upvote", comment.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
