use coach_api::url::{endpoint_url, DEFAULT_API_BASE_URL};
use coach_api::{normalize_api_url, Endpoint};

#[test]
fn blank_input_falls_back_to_default_base() {
    assert_eq!(normalize_api_url(""), DEFAULT_API_BASE_URL);
    assert_eq!(normalize_api_url("   "), DEFAULT_API_BASE_URL);
}

#[test]
fn trailing_slashes_are_trimmed() {
    assert_eq!(
        normalize_api_url("https://coach.example.com/api///"),
        "https://coach.example.com/api"
    );
}

#[test]
fn api_mount_point_is_appended_when_absent() {
    assert_eq!(
        normalize_api_url("https://coach.example.com"),
        "https://coach.example.com/api"
    );
    assert_eq!(
        normalize_api_url("https://coach.example.com/api"),
        "https://coach.example.com/api"
    );
}

#[test]
fn endpoint_urls_cover_the_full_surface() {
    let base = "https://coach.example.com";
    let expected = [
        (Endpoint::Chat, "/api/chat"),
        (Endpoint::Study, "/api/study"),
        (Endpoint::UploadCv, "/api/upload_cv"),
        (Endpoint::FindJobs, "/api/find_jobs"),
        (Endpoint::MatchJobs, "/api/match_jobs"),
        (Endpoint::JobFit, "/api/job_fit"),
        (Endpoint::AdaptCv, "/api/adapt_cv"),
        (Endpoint::CoverLetter, "/api/generate_cover_letter"),
    ];

    for (endpoint, suffix) in expected {
        assert_eq!(endpoint_url(base, endpoint), format!("{base}{suffix}"));
    }
}
