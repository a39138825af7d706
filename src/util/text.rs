use regex::Regex;

pub fn normalize_whitespace(value: &str) -> String {
  value
    .replace('\n', " ")
    .replace('\r', " ")
    .split_whitespace()
    .collect::<Vec<&str>>()
    .join(" ")
}

/// Lowercased, whitespace-collapsed form used as the job title search key.
pub fn search_key(value: &str) -> String {
  normalize_whitespace(value).to_lowercase()
}

/// Reads the integer prefix of a form value: leading whitespace and a sign
/// are accepted, anything after the digits is ignored.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
  let re = Regex::new(r"^\s*([+-]?)(\d+)").expect("regex");
  let caps = re.captures(raw)?;
  let negative = &caps[1] == "-";
  let digits = &caps[2];
  let parsed = match digits.parse::<i64>() {
    Ok(v) => v,
    Err(_) => i64::MAX,
  };
  if negative {
    Some(parsed.checked_neg().unwrap_or(i64::MIN))
  } else {
    Some(parsed)
  }
}

pub fn group_thousands(value: u64) -> String {
  let digits = value.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}
