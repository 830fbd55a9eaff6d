// src/services/gemini.rs
//! Gemini text generation client
//!
//! Thin client over the Google Generative Language `generateContent` REST
//! endpoint. Each document type maps to a purpose with its own system prompt
//! and minimum acceptable output length; short or empty model output is
//! treated as a failed generation.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("API key not configured")]
    NotConfigured,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Model returned little or no content")]
    EmptyContent,
}

/// What a generation request is for. Selects the system prompt, the user
/// prompt layout, and the minimum output length below which the result is
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPurpose {
    ResumeRewrite,
    CoverLetter,
    TailoredResume,
    InterviewQuestions,
}

impl GenerationPurpose {
    pub fn system_prompt(&self) -> &'static str {
        match self {
            GenerationPurpose::ResumeRewrite => {
                "You are an expert resume writer. Rewrite the following resume text into a modern, \
                 professional format. Focus on improving clarity, conciseness, and impact. Highlight \
                 key skills, quantifiable achievements, and relevant experience. Ensure consistent \
                 formatting (e.g., bullet points, section headers). Do NOT include placeholder text \
                 like '[Your Name]' or contact info unless it was in the original text. Just provide \
                 the rewritten resume content as plain text or using simple markdown for sections."
            }
            GenerationPurpose::CoverLetter => {
                "You are an expert cover letter writer. Write a professional and compelling cover \
                 letter for a job application. Tailor the letter specifically to the provided job \
                 description, drawing relevant skills and experiences from the candidate's resume. \
                 Use a standard business letter format (without placeholders for addresses/date \
                 unless present in resume, focus on the body). Keep it concise and impactful. \
                 Address the company and position if possible, otherwise use a standard greeting. \
                 Just provide the full cover letter text."
            }
            GenerationPurpose::TailoredResume => {
                "You are an expert resume writer and ATS optimizer. Your goal is to tailor the \
                 provided resume text towards the given job description. Read both carefully. Focus \
                 on highlighting the most relevant experience, skills, and keywords from the resume \
                 that match the job requirements. Adjust summary, experience, and skills sections \
                 accordingly. Maintain a professional resume structure (plain text or markdown \
                 sections). Do NOT hallucinate information not present in the original resume. Just \
                 provide the tailored resume content."
            }
            GenerationPurpose::InterviewQuestions => {
                "You are an expert interviewer. Generate a list of 5 to 10 potential interview \
                 questions specifically tailored to the candidate's background (from the resume) \
                 and the requirements of the job (from the job description). Focus on behavioral \
                 and technical questions relevant to the role and experience. Format the output as \
                 a clear, numbered list of questions."
            }
        }
    }

    /// Whether this purpose requires job description text alongside the resume
    pub fn needs_job_description(&self) -> bool {
        !matches!(self, GenerationPurpose::ResumeRewrite)
    }

    /// Outputs shorter than this are treated as a failed generation
    pub fn min_output_len(&self) -> usize {
        match self {
            GenerationPurpose::CoverLetter => 100,
            _ => 50,
        }
    }

    fn user_prompt(&self, resume_text: &str, jd_text: Option<&str>) -> String {
        match (self, jd_text) {
            (GenerationPurpose::ResumeRewrite, _) => {
                format!("Here is the original resume text:\n{}", resume_text)
            }
            (GenerationPurpose::TailoredResume, Some(jd)) => format!(
                "Here is the original resume text:\n{}\n\nHere is the job description:\n{}",
                resume_text, jd
            ),
            (_, Some(jd)) => format!(
                "Here is the candidate's resume:\n{}\n\nHere is the job description:\n{}",
                resume_text, jd
            ),
            // Callers validate this before scheduling; treated as plain resume input if hit.
            (_, None) => format!("Here is the candidate's resume:\n{}", resume_text),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug)]
pub struct GeminiService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiService {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(180))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model,
        }
    }

    /// Generate text for the given purpose from resume (and optional job
    /// description) source text.
    pub async fn generate(
        &self,
        purpose: GenerationPurpose,
        resume_text: &str,
        jd_text: Option<&str>,
    ) -> Result<String, GeminiError> {
        if self.api_key.is_none() {
            return Err(GeminiError::NotConfigured);
        }

        let request = GenerateContentRequest {
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: purpose.system_prompt().to_string(),
                }],
            }),
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: purpose.user_prompt(resume_text, jd_text),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 4000,
            },
        };

        debug!(
            purpose = ?purpose,
            model = %self.model,
            "Sending Gemini text generation request"
        );

        let response = self.make_request_with_retry(&request).await?;

        let generated_text = response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.trim().to_string())
            .ok_or_else(|| {
                GeminiError::InvalidResponse("No text in first candidate".to_string())
            })?;

        if generated_text.len() < purpose.min_output_len() {
            warn!(
                purpose = ?purpose,
                output_len = generated_text.len(),
                "Gemini returned little or no content"
            );
            return Err(GeminiError::EmptyContent);
        }

        if let Some(usage) = response.usage_metadata {
            info!(
                purpose = ?purpose,
                model = %self.model,
                tokens_used = usage.total_token_count,
                "Gemini text generation completed"
            );
        }

        Ok(generated_text)
    }

    /// Make API request with retry logic
    async fn make_request_with_retry(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let max_retries = 3;
        let mut last_error = None;

        for attempt in 1..=max_retries {
            match self.make_request(request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(
                        attempt = attempt,
                        max_retries = max_retries,
                        error = %e,
                        "Gemini API request failed, retrying..."
                    );
                    last_error = Some(e);

                    // Exponential backoff
                    if attempt < max_retries {
                        let delay = std::time::Duration::from_millis(1000 * 2_u64.pow(attempt - 1));
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GeminiError::RequestFailed("Unknown error".to_string())))
    }

    async fn make_request(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::NotConfigured)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| GeminiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_system_prompts_differ() {
        assert!(GenerationPurpose::ResumeRewrite
            .system_prompt()
            .contains("resume writer"));
        assert!(GenerationPurpose::CoverLetter
            .system_prompt()
            .contains("cover letter"));
        assert!(GenerationPurpose::TailoredResume
            .system_prompt()
            .contains("ATS"));
        assert!(GenerationPurpose::InterviewQuestions
            .system_prompt()
            .contains("interview"));
    }

    #[test]
    fn test_purpose_job_description_requirement() {
        assert!(!GenerationPurpose::ResumeRewrite.needs_job_description());
        assert!(GenerationPurpose::CoverLetter.needs_job_description());
        assert!(GenerationPurpose::TailoredResume.needs_job_description());
        assert!(GenerationPurpose::InterviewQuestions.needs_job_description());
    }

    #[test]
    fn test_user_prompt_includes_sources() {
        let prompt = GenerationPurpose::CoverLetter.user_prompt("MY RESUME", Some("THE JOB"));
        assert!(prompt.contains("MY RESUME"));
        assert!(prompt.contains("THE JOB"));

        let prompt = GenerationPurpose::ResumeRewrite.user_prompt("MY RESUME", None);
        assert!(prompt.contains("MY RESUME"));
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{"text": "Dear Hiring Manager,"}]
                    },
                    "finishReason": "STOP"
                }
            ],
            "usageMetadata": {"totalTokenCount": 321}
        }"#;

        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        let text = parsed.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .first()
            .map(|p| p.text.clone())
            .unwrap();
        assert_eq!(text, "Dear Hiring Manager,");
        assert_eq!(parsed.usage_metadata.as_ref().unwrap().total_token_count, 321);
    }

    #[test]
    fn test_response_parsing_no_candidates() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = GenerateContentRequest {
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: "system".to_string(),
                }],
            }),
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 4000,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 4000);
    }
}
