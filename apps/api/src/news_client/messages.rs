// User-facing failure messages. Arabic strings are shown verbatim in the
// newsroom UI.

/// Submission failed and the service gave no usable message.
pub const SUBMIT_FAILED_FALLBACK: &str = "حدث خطأ غير متوقع، يرجى المحاولة لاحقًا.";

/// Loading a template for reuse failed; the user may retry.
pub const TEMPLATE_LOAD_FAILED: &str = "تعذر تحميل القالب، يرجى المحاولة مرة أخرى.";

/// The template picked for reuse no longer exists; retrying will not help.
pub const TEMPLATE_NOT_FOUND: &str = "القالب المطلوب غير موجود.";

pub const TEMPLATES_FETCH_FAILED: &str = "Unable to fetch templates.";
pub const TEMPLATE_CREATE_FAILED: &str = "Failed to create template.";
pub const TEMPLATE_UPDATE_FAILED: &str = "Failed to update template.";
pub const TEMPLATE_DELETE_FAILED: &str = "Failed to delete template.";

pub const ARTICLE_LOAD_FAILED: &str = "تعذر تحميل الخبر. يرجى المحاولة لاحقًا.";
pub const ARTICLES_LOAD_FAILED: &str = "تعذر تحميل الأخبار. يرجى المحاولة لاحقًا.";
pub const ARTICLE_DELETE_FAILED: &str = "تعذر حذف الخبر. يرجى المحاولة لاحقًا.";
pub const ARTICLE_SAVE_FAILED: &str = "Error saving article. Please try again.";
