//! HTML email templates.

const STYLE: &str = "font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, \
    'Helvetica Neue', Arial, sans-serif; line-height: 1.6; color: #333; \
    max-width: 600px; margin: 0 auto; padding: 20px;";

const HEADER_STYLE: &str = "background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); \
    color: white; padding: 30px; text-align: center; border-radius: 10px 10px 0 0;";

const BUTTON_STYLE: &str = "display: inline-block; \
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; \
    padding: 12px 30px; text-decoration: none; border-radius: 5px; font-weight: bold;";

/// Welcome email sent after registration.
pub fn welcome_email(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<body style="{STYLE}">
  <div style="{HEADER_STYLE}">
    <h1>Welcome to FileShare Hub</h1>
  </div>
  <div style="background: #f8f9fa; padding: 30px; border-radius: 0 0 10px 10px;">
    <h2>Hello, {name}!</h2>
    <p>Your account is ready. You can now upload files, generate shareable
    download links with expiration dates and download limits, and manage
    everything from your dashboard.</p>
    <p>Happy sharing!</p>
  </div>
  <div style="text-align: center; color: #666; font-size: 12px; margin-top: 30px;">
    <p>This email was sent by FileShare Hub</p>
  </div>
</body>
</html>"#
    )
}

/// Password reset email with a time-limited reset link.
pub fn password_reset_email(reset_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<body style="{STYLE}">
  <div style="{HEADER_STYLE}">
    <h1>Password Reset Request</h1>
    <p>FileShare Hub</p>
  </div>
  <div style="background: #f8f9fa; padding: 30px; border-radius: 0 0 10px 10px;">
    <h2>Reset Your Password</h2>
    <p>We received a request to reset the password for your FileShare Hub
    account. If you didn't make this request, you can safely ignore this
    email.</p>
    <div style="text-align: center; margin: 20px 0;">
      <a href="{reset_url}" style="{BUTTON_STYLE}">Reset Password</a>
    </div>
    <p>Or copy and paste this link into your browser:</p>
    <p style="background: #e9ecef; padding: 10px; border-radius: 5px; word-break: break-all;">{reset_url}</p>
    <p><strong>This link expires in 1 hour and can only be used once.</strong></p>
  </div>
  <div style="text-align: center; color: #666; font-size: 12px; margin-top: 30px;">
    <p>This email was sent by FileShare Hub</p>
  </div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_includes_name() {
        let html = welcome_email("Alice");
        assert!(html.contains("Hello, Alice!"));
        assert!(html.contains("FileShare Hub"));
    }

    #[test]
    fn test_reset_includes_url() {
        let url = "https://share.example.com/auth/reset-password?token=abc";
        let html = password_reset_email(url);
        assert_eq!(html.matches(url).count(), 2);
    }
}
