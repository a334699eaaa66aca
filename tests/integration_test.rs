//! Integration tests for the CardioPredict client.
//!
//! Exercises the full form-to-result flow without requiring the live
//! prediction service; live-service tests are `#[ignore]`d.

use cardiopredict::client::{PredictionClient, RiskAssessment, RiskCategory};
use cardiopredict::profile::{ModelVariant, OrdinalLevel, ProfileDraft, Sex};
use cardiopredict::report;
use cardiopredict::{Phase, PredictError, Session, SessionEvent};

fn filled_draft() -> ProfileDraft {
    ProfileDraft {
        age: Some(58),
        sex: Some(Sex::Male),
        height_cm: Some(178.0),
        weight_kg: Some(92.0),
        systolic: Some(145),
        diastolic: Some(92),
        cholesterol: Some(OrdinalLevel::AboveNormal),
        glucose: Some(OrdinalLevel::Normal),
        smoker: Some(true),
        alcohol: Some(false),
        active: Some(false),
        model: ModelVariant::RandomForest,
    }
}

#[test]
fn test_component_initialization() {
    let client = PredictionClient::new("http://127.0.0.1:8000/predict", 30);
    assert!(client.is_ok());

    let session = Session::new();
    assert_eq!(session.phase(), Phase::Form);
}

#[tokio::test]
async fn test_failed_prediction_leaves_session_resubmittable() {
    // Port 9 (discard) refuses connections; the flow must come back to the
    // form with the draft intact
    let client = PredictionClient::new("http://127.0.0.1:9/predict", 2).unwrap();
    let mut session = Session::new();
    *session.draft_mut().unwrap() = filled_draft();
    let profile = session.draft().finish().unwrap();

    session.apply(SessionEvent::Submit).unwrap();
    let err = client.predict(&profile).await.unwrap_err();
    assert!(matches!(
        err,
        PredictError::Transport(_) | PredictError::Timeout { .. }
    ));

    session.apply(SessionEvent::PredictionFailed).unwrap();
    assert_eq!(session.phase(), Phase::Form);
    assert!(session.assessment().is_none());
    assert_eq!(session.draft().age, Some(58));
    // And a resubmit is a legal transition
    assert!(session.apply(SessionEvent::Submit).is_ok());
}

#[tokio::test]
async fn test_http_500_maps_to_status_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // One-shot local server that rejects whatever arrives with a 500
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let mut seen = Vec::new();
        // Read until the request head is complete
        while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => seen.extend_from_slice(&buf[..n]),
            }
        }
        let _ = socket
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\n\
                  content-length: 0\r\nconnection: close\r\n\r\n",
            )
            .await;
        let _ = socket.shutdown().await;
    });

    let client =
        PredictionClient::new(format!("http://{addr}/predict"), 5).unwrap();
    let mut session = Session::new();
    *session.draft_mut().unwrap() = filled_draft();
    let profile = session.draft().finish().unwrap();

    session.apply(SessionEvent::Submit).unwrap();
    let err = client.predict(&profile).await.unwrap_err();
    assert!(matches!(err, PredictError::Status { code: 500 }));

    // The server error does not become an assessment; the session lands
    // back on the form
    session.apply(SessionEvent::PredictionFailed).unwrap();
    assert_eq!(session.phase(), Phase::Form);
    assert!(session.assessment().is_none());
}

#[test]
fn test_successful_flow_then_reset() {
    let mut session = Session::new();
    *session.draft_mut().unwrap() = filled_draft();

    session.apply(SessionEvent::Submit).unwrap();
    let assessment = RiskAssessment {
        risk: RiskCategory::High,
        probability: 0.82,
        factors: vec!["High systolic blood pressure".to_string(), "Smoker".to_string()],
        model_used: "Random Forest".to_string(),
    };
    session
        .apply(SessionEvent::PredictionReady(assessment))
        .unwrap();
    assert_eq!(session.phase(), Phase::Review);
    assert_eq!(session.assessment().unwrap().probability, 0.82);

    session.apply(SessionEvent::Reset).unwrap();
    assert_eq!(session.phase(), Phase::Form);
    assert!(session.assessment().is_none());
    assert_eq!(*session.draft(), ProfileDraft::default());
    assert_eq!(session.draft().model, ModelVariant::RandomForest);
}

#[test]
fn test_profile_to_report_end_to_end() {
    let profile = filled_draft().finish().unwrap();
    let assessment = RiskAssessment {
        risk: RiskCategory::High,
        probability: 0.82,
        factors: vec!["High BP".to_string()],
        model_used: "Random Forest".to_string(),
    };

    let dir = tempfile::tempdir().unwrap();
    let path = report::save_report(&profile, &assessment, dir.path()).unwrap();
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
#[ignore] // Requires the live prediction service
async fn test_live_round_trip() {
    let client = PredictionClient::default();
    let profile = filled_draft().finish().unwrap();
    let assessment = client.predict(&profile).await.unwrap();
    assert!((0.0..=1.0).contains(&assessment.probability));
    assert!(!assessment.model_used.is_empty());
}
