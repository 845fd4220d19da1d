use serde_json::Value;

/// Injected into the login page on every tick.
///
/// Once the session cookie is visible it adds a copy button pinned to the
/// bottom of the page. `window.isAddCookieBtn` and the `#copy-btn` lookup
/// keep a second injection from adding another button.
pub const PROBE_SCRIPT: &str = r##"(() => {
  if (!document.cookie.match('jsessionid')) {
    return { isAddCookieBtn: false };
  }
  if (!window.isAddCookieBtn || !document.querySelector('#copy-btn')) {
    const copyWrap = document.createElement('div');
    copyWrap.innerHTML = '<div id="copy-btn" style="position: fixed; bottom: 0; left: 0; z-index: 999999; width: 100vw; height: 10vh; text-align: center; line-height: 10vh; background: #000000; color: #ffffff; font-size: 16px;">复制cookie</div>';
    document.body.appendChild(copyWrap);
    const copyBtn = document.querySelector('#copy-btn');
    const copied = () => {
      copyBtn.innerText = '复制成功';
      copyBtn.style.background = 'green';
    };
    copyBtn.onclick = () => {
      const text = document.cookie;
      if (navigator.clipboard && navigator.clipboard.writeText) {
        navigator.clipboard.writeText(text).then(copied, () => {
          if (legacyCopy(text)) copied();
        });
      } else if (legacyCopy(text)) {
        copied();
      }
    };
    function legacyCopy(text) {
      const input = document.createElement('input');
      input.setAttribute('value', text);
      document.body.appendChild(input);
      input.select();
      const result = document.execCommand('copy');
      document.body.removeChild(input);
      return result;
    }
    window.isAddCookieBtn = true;
  }
  return { isAddCookieBtn: !!document.querySelector('#copy-btn') };
})()"##;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeResult {
    pub is_add_cookie_btn: bool,
}

impl ProbeResult {
    /// Reads the script's reply. Only a boolean `isAddCookieBtn` field of an
    /// object counts; anything else means "not yet".
    pub fn from_value(value: &Value) -> Self {
        Self {
            is_add_cookie_btn: value
                .get("isAddCookieBtn")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}
