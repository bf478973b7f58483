pub const CONTAINER: &str = "min-h-screen bg-gradient-to-br from-pink-50 to-orange-50 dark:from-gray-900 dark:to-gray-800 w-full px-4 sm:px-6 lg:px-8 flex items-center justify-center";
pub const CARD: &str = "bg-white dark:bg-gray-800 p-6 sm:p-8 rounded-2xl shadow-xl max-w-xl w-full mx-auto border border-gray-100 dark:border-gray-700";
pub const TEXT_H1: &str = "text-3xl font-bold text-center text-gray-900 dark:text-white mb-2";
pub const TEXT_BODY: &str = "text-center text-gray-600 dark:text-gray-300 mb-6";
pub const TEXT_ERROR: &str = "text-sm text-red-500 dark:text-red-400 mt-2";
pub const TEXT_SMALL: &str = "text-sm text-gray-500 dark:text-gray-400";
pub const FORM: &str = "mt-4 space-y-4";
pub const INPUT: &str = "block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-3 px-4 text-gray-900 dark:text-white shadow-sm ring-1 ring-inset ring-gray-300 dark:ring-gray-700 placeholder:text-gray-400 focus:ring-2 focus:ring-pink-500";
pub const INPUT_VALID: &str = "block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-3 px-4 text-gray-900 dark:text-white shadow-sm ring-2 ring-inset ring-green-500";
pub const INPUT_ERROR: &str = "block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-3 px-4 text-gray-900 dark:text-white shadow-sm ring-2 ring-inset ring-red-400";
pub const BUTTON_PRIMARY: &str = "w-full py-4 px-8 rounded-full font-bold text-lg text-white bg-gradient-to-r from-pink-500 to-orange-400 hover:from-pink-600 hover:to-orange-500 shadow-lg transition-all duration-300 disabled:opacity-60 disabled:cursor-not-allowed";
pub const BUTTON_SECONDARY: &str = "w-full py-3 px-6 rounded-full font-medium border border-gray-300 dark:border-gray-600 text-gray-900 dark:text-white hover:bg-gray-50 dark:hover:bg-gray-700";
pub const LOADING_OVERLAY: &str = "fixed inset-0 z-50 flex items-center justify-center bg-white/70 dark:bg-gray-900/70 backdrop-blur-sm";
pub const LOADING_SPINNER: &str = "animate-spin h-10 w-10 rounded-full border-4 border-pink-500 border-t-transparent";
pub const RESULT_PRIZE: &str = "text-5xl font-bold text-center bg-clip-text text-transparent bg-gradient-to-r from-pink-500 to-orange-400 my-4";
pub const NOTICE_OFFLINE: &str = "mb-4 rounded-lg bg-amber-50 dark:bg-amber-900/40 border border-amber-300 dark:border-amber-700 px-4 py-2 text-sm text-amber-800 dark:text-amber-200 text-center";
