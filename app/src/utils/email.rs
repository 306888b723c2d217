use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::config::SmtpSettings;
use crate::otp::OtpPurpose;

const SENDER_NAME: &str = "Sākṣin Team";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Email transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()>;
}

pub struct SmtpMailer {
    from: Mailbox,
    transponder: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(emailer: &str, smtp: &SmtpSettings) -> anyhow::Result<Self> {
        let transponder = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)?
            .port(smtp.port)
            .credentials(Credentials::new(smtp.user.clone(), smtp.pass.clone()))
            .build();

        Ok(Self {
            from: Mailbox::new(Some(SENDER_NAME.to_string()), emailer.parse()?),
            transponder,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(None, email.to.parse()?))
            .subject(email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body),
                    ),
            )?;

        self.transponder
            .send(message)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send email: {}", e))?;
        Ok(())
    }
}

/// Outbox size used by `MemoryMailer::new`.
pub const MEMORY_OUTBOX_CAPACITY: usize = 100;

/// Keeps the most recent messages in memory instead of sending them, dropping
/// the oldest once `capacity` is reached. Used when no SMTP relay is
/// configured.
#[derive(Clone)]
pub struct MemoryMailer {
    outbox: Arc<Mutex<VecDeque<OutgoingEmail>>>,
    capacity: usize,
}

impl Default for MemoryMailer {
    fn default() -> Self {
        Self::with_capacity(MEMORY_OUTBOX_CAPACITY)
    }
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            outbox: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.outbox
            .lock()
            .map(|outbox| outbox.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn last_to(&self, to: &str) -> Option<OutgoingEmail> {
        self.sent().into_iter().rev().find(|m| m.to == to)
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()> {
        tracing::warn!(
            "SMTP not configured, email to {} kept in memory only: {}",
            email.to,
            email.subject
        );
        let mut outbox = self
            .outbox
            .lock()
            .map_err(|_| anyhow::anyhow!("memory outbox poisoned"))?;
        if outbox.len() >= self.capacity {
            outbox.pop_front();
        }
        outbox.push_back(email);
        Ok(())
    }
}

struct OtpTemplate {
    subject: &'static str,
    title: &'static str,
    subtitle: &'static str,
    label: &'static str,
    instruction: &'static str,
    notice: &'static str,
}

fn otp_template(purpose: OtpPurpose) -> OtpTemplate {
    match purpose {
        OtpPurpose::Login => OtpTemplate {
            subject: "🔐 Sākṣin - Login Authentication Required",
            title: "Login Authentication",
            subtitle: "Someone is signing in to your account",
            label: "Your Login Code",
            instruction: "Enter this code on the login screen to finish signing in.",
            notice: "If you did not initiate this login request, please ignore this email and consider changing your password.",
        },
        OtpPurpose::Register => OtpTemplate {
            subject: "📧 Sākṣin - Account Verification Required",
            title: "Verify Your Email",
            subtitle: "Welcome! One more step to create your account",
            label: "Your Verification Code",
            instruction: "Enter this code in the registration form to complete your account verification.",
            notice: "If you didn't create this account, please ignore this email.",
        },
        OtpPurpose::Forget => OtpTemplate {
            subject: "🔑 Sākṣin - Password Reset Verification",
            title: "Password Reset Request",
            subtitle: "We received a request to reset your password",
            label: "Your Reset Code",
            instruction: "Enter this code in the password reset form to create a new password for your account.",
            notice: "If you did not request this reset, please contact security@saksin.ai immediately.",
        },
        OtpPurpose::Update => OtpTemplate {
            subject: "🔐 Sākṣin - Password Update Authorization",
            title: "Password Update Authorization",
            subtitle: "A password change was requested from your account",
            label: "Your Authorization Code",
            instruction: "Use this code to complete your password update.",
            notice: "If you did not request this change, contact security@saksin.ai immediately and do not share this code.",
        },
    }
}

/// Renders the purpose-specific OTP message for `to`.
pub fn otp_email(to: &str, purpose: OtpPurpose, otp: &str, ttl: Duration) -> OutgoingEmail {
    let t = otp_template(purpose);
    let minutes = ttl.as_secs().div_ceil(60).max(1);

    let html_body = format!(
        r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <meta name="viewport" content="width=device-width, initial-scale=1.0">
            <title>{title}</title>
            <style>
                body {{
                    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
                    line-height: 1.6;
                    color: #333;
                    max-width: 650px;
                    margin: 0 auto;
                    padding: 20px;
                    background: #f8f9fa;
                }}
                .email-container {{
                    background: white;
                    border-radius: 12px;
                    border: 1px solid #e9ecef;
                    overflow: hidden;
                }}
                .header {{
                    background: linear-gradient(135deg, #FF6600 0%, #FF8C00 100%);
                    padding: 30px;
                    text-align: center;
                    color: white;
                }}
                .content {{
                    padding: 30px 40px;
                }}
                .otp-section {{
                    background: #fff7ed;
                    border: 2px dashed #fdba74;
                    border-radius: 8px;
                    padding: 20px;
                    text-align: center;
                    margin: 30px 0;
                }}
                .otp-label {{
                    color: #718096;
                    font-size: 14px;
                    text-transform: uppercase;
                    letter-spacing: 1px;
                }}
                .otp-code {{
                    font-size: 36px;
                    font-weight: bold;
                    color: #c2410c;
                    letter-spacing: 6px;
                    font-family: 'Courier New', monospace;
                    margin: 10px 0;
                }}
                .notice {{
                    background: #fef3c7;
                    color: #92400e;
                    padding: 15px;
                    border-radius: 6px;
                    font-size: 14px;
                }}
                .footer {{
                    text-align: center;
                    padding: 20px;
                    border-top: 1px solid #e2e8f0;
                    color: #718096;
                    font-size: 13px;
                }}
            </style>
        </head>
        <body>
            <div class="email-container">
                <div class="header">
                    <h1>{title}</h1>
                    <p>{subtitle}</p>
                </div>
                <div class="content">
                    <div class="otp-section">
                        <div class="otp-label">{label}</div>
                        <div class="otp-code">{otp}</div>
                        <p>⏰ Expires in {minutes} minutes</p>
                    </div>

                    <p>{instruction}</p>

                    <div class="notice">
                        <strong>🛡️ Security Information:</strong> This code can only be used once. Never share it with anyone. {notice}
                    </div>
                </div>
                <div class="footer">
                    <p>© 2025 Sākṣin. All rights reserved.</p>
                    <p>Support: support@saksin.ai</p>
                </div>
            </div>
        </body>
        </html>
        "#,
        title = t.title,
        subtitle = t.subtitle,
        label = t.label,
        otp = otp,
        minutes = minutes,
        instruction = t.instruction,
        notice = t.notice,
    );

    let text_body = format!(
        "Sākṣin - {title}\n\n{label}: {otp}\n\nThis code expires in {minutes} minutes and can only be used once. Do not share it with anyone.\n\n{instruction}\n\n{notice}",
        title = t.title,
        label = t.label,
        otp = otp,
        minutes = minutes,
        instruction = t.instruction,
        notice = t.notice,
    );

    OutgoingEmail {
        to: to.to_owned(),
        subject: t.subject.to_owned(),
        text_body,
        html_body,
    }
}
