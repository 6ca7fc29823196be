//! Prompt construction for the complexity estimate.
//!
//! The template is fixed and the language tag and code are inserted verbatim;
//! the embedded n=1..5 quadratic curve is a one-shot example of the reply
//! shape the model is asked to produce.

/// Builds the analysis prompt for the given code and language tag.
pub fn build_prompt(code: &str, language: &str) -> String {
    format!(
        r#"
Analyze the following {language} code and estimate its time complexity using Big O notation.
Return your answer in the following JSON format:

{{
  "complexity": "O(n^2)",
  "graphData": [
    {{"n": 1, "ops": 1}},
    {{"n": 2, "ops": 4}},
    {{"n": 3, "ops": 9}},
    {{"n": 4, "ops": 16}},
    {{"n": 5, "ops": 25}}
  ],
  "explanation": "This code uses a nested loop, so for each n, it does n*n operations."
}}

Here is the code:

```{language}
{code}
```
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_code_and_language() {
        let prompt = build_prompt("for i in range(n): pass", "python");
        assert!(prompt.contains("following python code"));
        assert!(prompt.contains("```python\nfor i in range(n): pass\n```"));
    }

    #[test]
    fn test_prompt_carries_one_shot_example() {
        let prompt = build_prompt("x = 1", "python");
        assert!(prompt.contains(r#""complexity": "O(n^2)""#));
        assert!(prompt.contains(r#"{"n": 5, "ops": 25}"#));
        assert!(prompt.contains(r#""explanation""#));
    }

    #[test]
    fn test_code_is_inserted_verbatim() {
        let code = "  indented\n\ttabbed  ";
        let prompt = build_prompt(code, "rust");
        assert!(prompt.contains("```rust\n  indented\n\ttabbed  \n```"));
    }
}
