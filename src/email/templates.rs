pub fn render_password_setup(email: &str, setup_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Welcome to Memberdesk</h2>
    <p>Hello {email},</p>
    <p>An account has been created for you. Click the link below to set your password:</p>
    <p><a href="{setup_url}" style="display: inline-block; padding: 10px 20px; background: #0070f3; color: white; text-decoration: none; border-radius: 4px;">Set Password</a></p>
    <p style="color: #666; font-size: 14px;">This link is valid for 24 hours and can be used once. If you didn't expect this email, you can ignore it.</p>
</body>
</html>"#
    )
}
