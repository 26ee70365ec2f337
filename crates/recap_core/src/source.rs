use serde::Serialize;
use url::Url;

/// Where a submitted meeting link comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    VideoPlatform,
    CloudRecording,
    Unknown,
}

impl SourceKind {
    /// Human readable label shown once the link has been validated.
    pub fn label(self) -> Option<&'static str> {
        match self {
            SourceKind::VideoPlatform => Some("YouTube Video"),
            SourceKind::CloudRecording => Some("Zoom Cloud Recording"),
            SourceKind::Unknown => None,
        }
    }
}

/// Classifies a submitted string by plain substring containment.
///
/// No trimming, scheme checks or URL parsing takes place.
pub fn classify(input: &str) -> SourceKind {
    if input.contains("youtube.com") || input.contains("youtu.be") {
        SourceKind::VideoPlatform
    } else if input.contains("zoom.us") {
        SourceKind::CloudRecording
    } else {
        SourceKind::Unknown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// JSON body sent to the cloud-recording extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlBody {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPayload {
    Query(Vec<(String, String)>),
    Json(UrlBody),
}

/// Outbound extraction call, fully determined by the [`SourceKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub method: HttpMethod,
    pub endpoint: Url,
    pub payload: RequestPayload,
}

impl ExtractionRequest {
    /// Endpoint with any query parameters form-encoded onto it.
    pub fn target(&self) -> Url {
        let mut target = self.endpoint.clone();
        if let RequestPayload::Query(pairs) = &self.payload {
            if !pairs.is_empty() {
                let mut query = target.query_pairs_mut();
                for (key, value) in pairs {
                    query.append_pair(key, value);
                }
            }
        }
        target
    }

    pub fn json_body(&self) -> Option<&UrlBody> {
        match &self.payload {
            RequestPayload::Json(body) => Some(body),
            RequestPayload::Query(_) => None,
        }
    }
}

/// Base URLs of the source-specific extraction services. There is no
/// built-in default; the binary supplies them from its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionEndpoints {
    pub video_platform: Url,
    pub cloud_recording: Url,
}

/// Builds the outbound request for `input`. Unknown sources are never dispatched.
pub fn build_request(
    input: &str,
    kind: SourceKind,
    endpoints: &ExtractionEndpoints,
) -> Option<ExtractionRequest> {
    match kind {
        SourceKind::VideoPlatform => Some(ExtractionRequest {
            method: HttpMethod::Get,
            endpoint: endpoints.video_platform.clone(),
            payload: RequestPayload::Query(vec![("url".to_string(), input.to_string())]),
        }),
        SourceKind::CloudRecording => Some(ExtractionRequest {
            method: HttpMethod::Post,
            endpoint: endpoints.cloud_recording.clone(),
            payload: RequestPayload::Json(UrlBody {
                url: input.to_string(),
            }),
        }),
        SourceKind::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_matches_substrings_only() {
        assert_eq!(classify("watch youtube.com/v=1"), SourceKind::VideoPlatform);
        assert_eq!(classify("https://youtu.be/x"), SourceKind::VideoPlatform);
        assert_eq!(classify("https://acme.zoom.us/rec/1"), SourceKind::CloudRecording);
        assert_eq!(classify("zoom.us"), SourceKind::CloudRecording);
        assert_eq!(classify("https://vimeo.com/1"), SourceKind::Unknown);
        assert_eq!(classify(""), SourceKind::Unknown);
    }

    #[test]
    fn video_platform_wins_over_cloud_recording() {
        assert_eq!(
            classify("https://youtube.com/watch?v=zoom.us"),
            SourceKind::VideoPlatform
        );
    }

    #[test]
    fn unknown_source_builds_no_request() {
        let endpoints = ExtractionEndpoints {
            video_platform: Url::parse("http://localhost/extract-youtube").unwrap(),
            cloud_recording: Url::parse("http://localhost/extract-zoom").unwrap(),
        };
        assert_eq!(build_request("not a url", SourceKind::Unknown, &endpoints), None);
    }
}
