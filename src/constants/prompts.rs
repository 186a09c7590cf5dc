pub const SYSTEM_PROMPT: &str = "You are an expert educational content creator. Create high-quality, engaging learning materials that are clear, accurate, and pedagogically sound.";

pub const LEARNING_PAGE_INCLUDE: &str = "Include:
- Clear explanations
- Key concepts
- Examples
- Visual descriptions where helpful";

pub const EXERCISE_INCLUDE: &str = "Include:
- A clear question/problem
- DO NOT include the solution, hints towards the answer, or worked steps";

pub const EXERCISE_WITH_SOLUTION_INCLUDE: &str = "Include:
- A clear question/problem
- Step-by-step solution path
- Detailed explanation of each step
- Key concepts and reasoning";

pub const LEARNING_PAGE_MATH_EXAMPLE: &str =
    r"Example: The quadratic formula is \[ x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a} \]";

pub const EXERCISE_WITH_SOLUTION_MATH_EXAMPLE: &str = r"Example: Step 1: Calculate \[ D = b^2 - 4ac \]";

/// Shared output contract. The numbered example line, when a template has
/// one, is inserted after rule 3.
pub const FORMATTING_RULES_HEAD: &str = r"CRITICAL FORMATTING RULES:
1. Return ONLY markdown content - NO code blocks, NO backticks wrapping the content
2. Use markdown: # for h1, ## for h2, **bold**, *italic*, numbered lists
3. For mathematical expressions, use EXACTLY these formats:
   - Display math (centered): \[ formula \]
   - Inline math (in text): \( formula \)";

pub const FORMATTING_RULES_TAIL: [&str; 2] = [
    r"DO NOT use $ or $$ for math - ONLY use \[ \] and \( \)",
    r"DO NOT escape the backslashes - write \[ not \\[",
];

pub const ADDITIONAL_INSTRUCTIONS_HEADING: &str = "Additional instructions:";
