//! Message templates and system instructions.
//!
//! Provides the user-facing texts (Telegram Markdown) and the fixed system
//! instructions sent to the completion API for each category.

use super::Category;

/// Returns the text asking the user to describe their idea for a category.
pub fn elicitation_for_category(category: Category) -> &'static str {
    match category {
        Category::Image => IMAGE_ELICITATION,
        Category::Code => CODE_ELICITATION,
        Category::Video => VIDEO_ELICITATION,
        Category::Text => TEXT_ELICITATION,
    }
}

/// Returns the system instruction used to generate a prompt for a category.
pub fn system_instruction_for_category(category: Category) -> &'static str {
    match category {
        Category::Image => IMAGE_INSTRUCTION,
        Category::Code => CODE_INSTRUCTION,
        Category::Video => VIDEO_INSTRUCTION,
        Category::Text => TEXT_INSTRUCTION,
    }
}

/// Builds the user message for a refinement request.
pub fn refinement_message(current_prompt: &str, requested_changes: &str) -> String {
    format!(
        "Current prompt:\n{}\n\nUser's requested changes or additions:\n{}",
        current_prompt, requested_changes
    )
}

/// Builds the `/history` header for `count` entries.
pub fn history_header(count: usize) -> String {
    format!("📜 *Last {} prompts:*\n\n", count)
}

// ============================================================================
// User-facing messages
// ============================================================================

pub const WELCOME: &str = "👋 *Hi!*\n\n\
I help you write strong prompts for AI tools.\n\
Pick a category, describe what you want — I'll turn it into a ready-to-use prompt.\n\n\
👇 _Choose one:_";

pub const HELP: &str = "📖 *Commands*\n\n\
• /start — show menu\n\
• /help — this message\n\
• /cancel — back to menu\n\
• /history — last generated prompts\n\n\
💡 *How it works*\n\
1. Tap a category (Image, Code, Video, Text)\n\
2. Describe your idea in a few words or sentences\n\
3. Copy the generated prompt and use it in your AI tool";

pub const CHOOSE_CATEGORY: &str = "👇 Choose a category:";
pub const GENERATING: &str = "⏳ Generating your prompt…";
pub const ERROR_NETWORK: &str = "❌ Network error or timeout. Check your connection and try again.";
pub const ERROR_API: &str = "❌ API error. Check your API key or quota and try again.";
pub const ERROR_UNKNOWN: &str = "❌ Something went wrong. Try again or pick another category.";
pub const CANCELLED: &str = "↩️ Back to menu. Choose a category:";
pub const HERE_IS_PROMPT: &str = "✅ _Here's your prompt — copy and use it:_";
pub const RATE_LIMITED: &str = "⏳ Too many requests. Please wait a minute and try again.";
pub const HISTORY_EMPTY: &str = "📭 No generated prompts yet. Use the menu to create one.";
pub const APPROVE_OR_REFINE: &str = "What next?";
pub const SEND_REFINEMENT: &str =
    "✏️ Send your additional details or changes (e.g. add something, make it shorter, change tone):";

// Button labels
pub const BUTTON_HELP: &str = "❓ Help";
pub const BUTTON_BACK: &str = "↩️ Back to menu";
pub const BUTTON_APPROVE: &str = "✅ Approve";
pub const BUTTON_REFINE: &str = "✏️ Refine";

// ============================================================================
// Elicitation texts
// ============================================================================

const IMAGE_ELICITATION: &str = "🖼 *Image prompt*\n\n\
Describe what you want in the image (subject, style, mood, details):";

const CODE_ELICITATION: &str = "💻 *Code prompt*\n\n\
Describe the task (language, what the code should do, any constraints):";

const VIDEO_ELICITATION: &str = "🎬 *Video prompt*\n\n\
Describe the scene or story (action, camera, style, length):";

const TEXT_ELICITATION: &str = "✍️ *Text prompt*\n\n\
Describe what you need (topic, tone, audience, format):";

// ============================================================================
// System instructions
// ============================================================================

const IMAGE_INSTRUCTION: &str = "You are an expert prompt engineer for AI image generators \
(Midjourney, DALL-E, Stable Diffusion). Based on the user's description, create a highly \
detailed English prompt following this order: \
1. Subject (with appearance, action, expression) \
2. Environment and background \
3. Lighting and colors \
4. Style and mood (e.g., cinematic, cyberpunk, minimalist) \
5. Technical specs (8k, photorealistic, unreal engine, etc.) \
Use precise, descriptive language. Avoid generic terms. \
If aspect ratio is not mentioned, assume square (--ar 1:1). \
Output ONLY the prompt, no commentary.";

const VIDEO_INSTRUCTION: &str = "You are an expert prompt engineer for AI video generation \
(Sora, Runway, Pika). Create a detailed English prompt based on the user's description. Include: \
1. Scene and subject (what happens, who/what is in frame) \
2. Camera movement and angles (e.g., slow pan, drone shot, close-up) \
3. Motion and pacing (fast/slow, smooth/erratic) \
4. Lighting, colors, and atmosphere (cinematic, moody, vibrant) \
5. Visual style (photorealistic, 3D animation, cyberpunk, etc.) \
6. Duration (if not specified, suggest 5-10 seconds) \
7. Optional: sound description or mood (if relevant) \
Use vivid, cinematic language. Output ONLY the prompt, no explanations.";

const CODE_INSTRUCTION: &str = "You are an expert prompt engineer for code generation. \
Transform the user's task into a precise, structured prompt for an AI coding assistant. Include: \
1. Programming language and version (if relevant) \
2. Core functionality and features (what the code should do) \
3. Input/output examples or expected behavior \
4. Libraries, frameworks, and dependencies \
5. Constraints (performance, security, compatibility) \
6. Code style (naming, comments, type annotations, etc.) \
7. Edge cases and error handling considerations \
Be explicit about what the generated code should accomplish. \
Output ONLY the prompt, no explanations.";

const TEXT_INSTRUCTION: &str = "You are an expert prompt engineer for text-based AI assistants. \
Craft an effective prompt based on the user's request. The prompt should include: \
1. Role for the AI (e.g., 'You are a marketing expert') \
2. Context and background information \
3. Specific task or question \
4. Tone and style (formal, casual, persuasive, humorous) \
5. Target audience (experts, beginners, children) \
6. Desired format (essay, bullet points, table, dialogue) \
7. Length constraints (word count, paragraph count) \
8. Examples (if helpful) or what to avoid \
Make the prompt detailed but concise. Output ONLY the final prompt, no explanations.";

/// Instruction used for every refinement, independent of category.
pub const REFINEMENT_INSTRUCTION: &str = "You are refining an existing prompt. You will receive: \
1) The current prompt, 2) The user's requested changes or additions. \
Output ONLY the improved full prompt that incorporates the user's feedback. \
No commentary or explanation.";
