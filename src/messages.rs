use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Language {
    #[default]
    En,
    Zh,
}

/// User-facing strings of the report.
#[derive(Debug)]
pub struct Messages {
    pub html_lang: &'static str,
    pub report_title: &'static str,
    pub generated_on: &'static str,
    pub total_commits: &'static str,
    pub contributors: &'static str,
    pub active_days: &'static str,
    pub active_period: &'static str,
    pub period_to: &'static str,
    pub top_contributors: &'static str,
    pub commit_timeline: &'static str,
    pub hourly_activity: &'static str,
    pub daily_activity: &'static str,
    pub most_modified_files: &'static str,
    pub commit_forest: &'static str,
    pub commits: &'static str,
    pub modifications: &'static str,
    pub ai_analysis_title: &'static str,
    pub key_insights: &'static str,
    pub no_analysis: &'static str,
    pub no_commit_data: &'static str,
    pub chart_library_missing: &'static str,
    pub all_branches: &'static str,
    pub zoom_in: &'static str,
    pub zoom_out: &'static str,
    pub reset_view: &'static str,
    pub commit_details: &'static str,
    pub branch: &'static str,
    pub author: &'static str,
    pub time: &'static str,
    pub message: &'static str,
    pub hash: &'static str,
    pub short_hash: &'static str,
    pub merge_commit: &'static str,
    pub parents: &'static str,
    pub no_message: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub insight_top_contributor: &'static str,
    pub insight_busiest_day: &'static str,
    pub insight_pace: &'static str,
    pub insight_pace_value: &'static str,
    pub insight_collaboration: &'static str,
    pub insight_collaboration_value: &'static str,
}

static EN: Messages = Messages {
    html_lang: "en",
    report_title: "Git Repository Analysis Report",
    generated_on: "Generated on",
    total_commits: "Total Commits",
    contributors: "Contributors",
    active_days: "Active Days",
    active_period: "Active Period",
    period_to: "to",
    top_contributors: "Top Contributors",
    commit_timeline: "Commit Timeline",
    hourly_activity: "Hourly Activity",
    daily_activity: "Daily Activity",
    most_modified_files: "Most Modified Files",
    commit_forest: "Commit Forest",
    commits: "commits",
    modifications: "Modifications",
    ai_analysis_title: "AI Analysis",
    key_insights: "Key Insights",
    no_analysis: "No AI analysis available",
    no_commit_data: "No commit data",
    chart_library_missing: "Chart library not loaded",
    all_branches: "All branches",
    zoom_in: "Zoom in",
    zoom_out: "Zoom out",
    reset_view: "Reset",
    commit_details: "Commit details",
    branch: "Branch",
    author: "Author",
    time: "Time",
    message: "Message",
    hash: "Hash",
    short_hash: "Short hash",
    merge_commit: "Merge commit",
    parents: "Parents",
    no_message: "(no message)",
    yes: "yes",
    no: "no",
    insight_top_contributor: "Top contributor",
    insight_busiest_day: "Most active day",
    insight_pace: "Development pace",
    insight_pace_value: "High-frequency commit pattern",
    insight_collaboration: "Collaboration",
    insight_collaboration_value: "Healthy team collaboration",
};

static ZH: Messages = Messages {
    html_lang: "zh-CN",
    report_title: "Git 仓库分析报告",
    generated_on: "生成时间",
    total_commits: "总提交数",
    contributors: "贡献者",
    active_days: "活跃天数",
    active_period: "活跃周期",
    period_to: "至",
    top_contributors: "主要贡献者",
    commit_timeline: "提交时间线",
    hourly_activity: "每小时活动",
    daily_activity: "每日活动",
    most_modified_files: "修改最多的文件",
    commit_forest: "提交森林图",
    commits: "次提交",
    modifications: "修改次数",
    ai_analysis_title: "智能分析",
    key_insights: "关键洞察",
    no_analysis: "暂无AI分析内容",
    no_commit_data: "暂无提交数据",
    chart_library_missing: "图表库未加载",
    all_branches: "全部分支",
    zoom_in: "放大",
    zoom_out: "缩小",
    reset_view: "重置",
    commit_details: "提交详情",
    branch: "分支",
    author: "作者",
    time: "时间",
    message: "消息",
    hash: "哈希",
    short_hash: "短哈希",
    merge_commit: "合并提交",
    parents: "父提交",
    no_message: "无消息",
    yes: "是",
    no: "否",
    insight_top_contributor: "核心贡献者",
    insight_busiest_day: "最活跃日期",
    insight_pace: "开发节奏",
    insight_pace_value: "高频提交模式",
    insight_collaboration: "协作模式",
    insight_collaboration_value: "团队协作良好",
};

impl Messages {
    pub fn for_language(language: Language) -> &'static Messages {
        match language {
            Language::En => &EN,
            Language::Zh => &ZH,
        }
    }
}
