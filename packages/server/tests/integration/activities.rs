use crate::common::{TestApp, routes};
use mergington_server::entity::workshop::WorkshopStatus;

mod listing {
    use super::*;

    #[tokio::test]
    async fn empty_database_lists_no_activities() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::ACTIVITIES).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn lists_published_activities_with_all_fields() {
        let app = TestApp::spawn_seeded().await;

        let res = app.get(routes::ACTIVITIES).await;

        assert_eq!(res.status, 200);
        let activities = res.body.as_array().unwrap();
        assert_eq!(activities.len(), 2);

        let chess = &activities[0];
        assert_eq!(chess["title"], "Chess Club");
        assert_eq!(
            chess["description"],
            "Learn strategies and compete in chess tournaments"
        );
        assert_eq!(chess["schedule"], "Fridays, 3:30 PM - 5:00 PM");
        assert_eq!(chess["max_participants"], 12);
        assert_eq!(chess["participants_count"], 0);

        let programming = &activities[1];
        assert_eq!(programming["title"], "Programming Class");
        assert_eq!(programming["max_participants"], 20);
        assert_eq!(programming["participants_count"], 0);
    }

    #[tokio::test]
    async fn draft_activities_are_never_listed() {
        let app = TestApp::spawn().await;
        app.create_workshop("Secret Society", Some(5), WorkshopStatus::Draft)
            .await;
        app.create_workshop("Art Club", None, WorkshopStatus::Published)
            .await;

        let res = app.get(routes::ACTIVITIES).await;

        let titles: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Art Club"]);
    }

    #[tokio::test]
    async fn unlimited_activity_has_null_max_participants() {
        let app = TestApp::spawn().await;
        app.create_workshop("Art Club", None, WorkshopStatus::Published)
            .await;

        let art = app.activity("Art Club").await.unwrap();

        assert!(art["max_participants"].is_null());
    }

    #[tokio::test]
    async fn counts_are_tracked_per_activity() {
        let app = TestApp::spawn_seeded().await;
        app.signup("Chess Club", "a@x.com").await;
        app.signup("Chess Club", "b@x.com").await;
        app.signup("Programming Class", "a@x.com").await;

        assert_eq!(app.participants_count("Chess Club").await, 2);
        assert_eq!(app.participants_count("Programming Class").await, 1);
    }
}

mod signup {
    use super::*;

    #[tokio::test]
    async fn signs_up_a_new_student() {
        let app = TestApp::spawn_seeded().await;

        let res = app.signup("Chess Club", "a@x.com").await;

        assert_eq!(res.status, 200, "signup failed: {}", res.text);
        assert_eq!(res.body["message"], "Signed up a@x.com for Chess Club");
        assert_eq!(app.participants_count("Chess Club").await, 1);
    }

    #[tokio::test]
    async fn rejects_duplicate_signup() {
        let app = TestApp::spawn_seeded().await;
        app.signup("Chess Club", "a@x.com").await;

        let res = app.signup("Chess Club", "a@x.com").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "ALREADY_SIGNED_UP");
        assert_eq!(res.body["message"], "Student is already signed up");
        assert_eq!(app.participants_count("Chess Club").await, 1);
    }

    #[tokio::test]
    async fn rejects_signup_when_full() {
        let app = TestApp::spawn().await;
        app.create_workshop("Robotics", Some(2), WorkshopStatus::Published)
            .await;
        assert_eq!(app.signup("Robotics", "a@x.com").await.status, 200);
        assert_eq!(app.signup("Robotics", "b@x.com").await.status, 200);

        let res = app.signup("Robotics", "c@x.com").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "ACTIVITY_FULL");
        assert_eq!(res.body["message"], "Activity is full");
        assert_eq!(app.participants_count("Robotics").await, 2);
    }

    #[tokio::test]
    async fn duplicate_is_reported_before_capacity() {
        let app = TestApp::spawn().await;
        app.create_workshop("Robotics", Some(1), WorkshopStatus::Published)
            .await;
        app.signup("Robotics", "a@x.com").await;

        let res = app.signup("Robotics", "a@x.com").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Student is already signed up");
    }

    #[tokio::test]
    async fn unknown_activity_returns_404() {
        let app = TestApp::spawn_seeded().await;

        let res = app.signup("Underwater Basket Weaving", "a@x.com").await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["message"], "Activity not found");
    }

    #[tokio::test]
    async fn draft_activity_still_accepts_signups() {
        let app = TestApp::spawn().await;
        app.create_workshop("Secret Society", None, WorkshopStatus::Draft)
            .await;

        let res = app.signup("Secret Society", "a@x.com").await;

        assert_eq!(res.status, 200);
        assert!(app.activity("Secret Society").await.is_none());
    }

    #[tokio::test]
    async fn missing_email_is_a_validation_error() {
        let app = TestApp::spawn_seeded().await;

        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::signup("Chess Club")))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(app.participants_count("Chess Club").await, 0);
    }
}

mod unregister {
    use super::*;

    #[tokio::test]
    async fn unregisters_a_signed_up_student() {
        let app = TestApp::spawn_seeded().await;
        app.signup("Chess Club", "a@x.com").await;
        app.signup("Chess Club", "b@x.com").await;

        let res = app.unregister("Chess Club", "a@x.com").await;

        assert_eq!(res.status, 200, "unregister failed: {}", res.text);
        assert_eq!(res.body["message"], "Unregistered a@x.com from Chess Club");
        assert_eq!(app.participants_count("Chess Club").await, 1);
    }

    #[tokio::test]
    async fn rejects_student_not_signed_up() {
        let app = TestApp::spawn_seeded().await;
        app.signup("Programming Class", "a@x.com").await;

        let res = app.unregister("Chess Club", "a@x.com").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "NOT_SIGNED_UP");
        assert_eq!(
            res.body["message"],
            "Student is not signed up for this activity"
        );
        assert_eq!(app.participants_count("Programming Class").await, 1);
    }

    #[tokio::test]
    async fn unknown_activity_returns_404() {
        let app = TestApp::spawn_seeded().await;

        let res = app.unregister("Underwater Basket Weaving", "a@x.com").await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Activity not found");
    }

    #[tokio::test]
    async fn frees_a_seat_in_a_full_activity() {
        let app = TestApp::spawn().await;
        app.create_workshop("Robotics", Some(1), WorkshopStatus::Published)
            .await;
        app.signup("Robotics", "a@x.com").await;
        assert_eq!(app.signup("Robotics", "b@x.com").await.status, 400);

        app.unregister("Robotics", "a@x.com").await;
        let res = app.signup("Robotics", "b@x.com").await;

        assert_eq!(res.status, 200);
    }
}

mod concurrent {
    use super::*;

    fn students(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("student{i}@x.com")).collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_signups_never_exceed_capacity() {
        let app = TestApp::spawn().await;
        app.create_workshop("Robotics", Some(5), WorkshopStatus::Published)
            .await;

        let responses = app.signup_concurrently("Robotics", &students(30)).await;

        let accepted = responses.iter().filter(|r| r.status == 200).count();
        for res in responses.iter().filter(|r| r.status != 200) {
            assert_eq!(res.status, 400, "unexpected response: {}", res.text);
            assert_eq!(res.body["code"], "ACTIVITY_FULL");
        }
        assert_eq!(accepted, 5);
        assert_eq!(app.participants_count("Robotics").await, 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_duplicate_signups_keep_one_seat() {
        let app = TestApp::spawn().await;
        app.create_workshop("Robotics", None, WorkshopStatus::Published)
            .await;
        let same_student = vec!["a@x.com".to_string(); 10];

        let responses = app.signup_concurrently("Robotics", &same_student).await;

        let accepted = responses.iter().filter(|r| r.status == 200).count();
        for res in responses.iter().filter(|r| r.status != 200) {
            assert_eq!(res.status, 400, "unexpected response: {}", res.text);
            assert_eq!(res.body["code"], "ALREADY_SIGNED_UP");
        }
        assert_eq!(accepted, 1);
        assert_eq!(app.participants_count("Robotics").await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_signups_and_listing_do_not_fail() {
        let app = TestApp::spawn_seeded().await;

        let emails = students(20);
        let (responses, listed) = tokio::join!(
            app.signup_concurrently("Chess Club", &emails),
            async {
                let mut listed = Vec::new();
                for _ in 0..10 {
                    listed.push(app.get(routes::ACTIVITIES).await.status);
                }
                listed
            }
        );

        assert!(listed.iter().all(|status| *status == 200));
        assert_eq!(responses.iter().filter(|r| r.status == 200).count(), 12);
        assert!(responses.iter().all(|r| r.status == 200 || r.status == 400));
        assert_eq!(app.participants_count("Chess Club").await, 12);
    }
}

/// Walks through the sample data end to end.
#[tokio::test]
async fn chess_club_signup_lifecycle() {
    let app = TestApp::spawn_seeded().await;
    assert_eq!(app.participants_count("Chess Club").await, 0);
    assert_eq!(app.participants_count("Programming Class").await, 0);

    let res = app.signup("Chess Club", "a@x.com").await;
    assert_eq!(res.status, 200);
    assert_eq!(app.participants_count("Chess Club").await, 1);

    let res = app.signup("Chess Club", "a@x.com").await;
    assert_eq!(res.status, 400);
    assert_eq!(app.participants_count("Chess Club").await, 1);

    let res = app.unregister("Chess Club", "a@x.com").await;
    assert_eq!(res.status, 200);
    assert_eq!(app.participants_count("Chess Club").await, 0);
}
