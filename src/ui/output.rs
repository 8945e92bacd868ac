//! Output functions for consistent stderr formatting

use super::context::UiContext;
use crate::session::Shell;
use console::{style, Emoji};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "[WARN] ");

/// Display a title line
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.is_quiet() {
        return;
    }
    if ctx.use_fancy_output() {
        eprintln!("{}", style(title).cyan().bold());
    } else {
        eprintln!("{}", title);
    }
}

/// Display a success step
pub fn step_ok(ctx: &UiContext, message: &str) {
    if ctx.is_quiet() {
        return;
    }
    if ctx.use_fancy_output() {
        eprintln!("  {}{}", style(CHECK.to_string()).green(), message);
    } else {
        eprintln!("  [OK] {}", message);
    }
}

/// Display a success step with detail
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    if ctx.is_quiet() {
        return;
    }
    if ctx.use_fancy_output() {
        eprintln!("  {}{} ({})", style(CHECK.to_string()).green(), message, style(detail).dim());
    } else {
        eprintln!("  [OK] {} ({})", message, detail);
    }
}

/// Display a warning step
pub fn step_warn(ctx: &UiContext, message: &str) {
    if ctx.is_quiet() {
        return;
    }
    if ctx.use_fancy_output() {
        eprintln!("  {}{}", style(WARN.to_string()).yellow(), message);
    } else {
        eprintln!("  [WARN] {}", message);
    }
}

/// Print styled key-value pair
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    if ctx.is_quiet() {
        return;
    }
    if ctx.use_fancy_output() {
        eprintln!("  {}: {}", style(key).dim(), value);
    } else {
        eprintln!("  {}: {}", key, value);
    }
}

/// Remind the user how to apply the script when stdout is a terminal
pub fn usage_hint(ctx: &UiContext, shell: Shell, invocation: &str) {
    if ctx.is_quiet() || !ctx.use_fancy_output() {
        return;
    }
    let example = match shell {
        Shell::Powershell => format!("{} | Out-String | Invoke-Expression", invocation),
        Shell::Cmd => format!("for /f \"delims=\" %i in ('{}') do @%i", invocation),
        Shell::Posix => format!("eval \"$({})\"", invocation),
    };
    eprintln!("  {}", style(format!("Apply with: {}", example)).dim());
}
